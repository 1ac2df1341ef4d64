use pingtrend_model::RunSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    LossPercent,
    Min,
    Max,
    Avg,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::LossPercent, Field::Min, Field::Max, Field::Avg];

    pub fn label(self) -> &'static str {
        match self {
            Field::LossPercent => "Loss Percent",
            Field::Min => "Min",
            Field::Max => "Max",
            Field::Avg => "Avg",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Field::LossPercent => "%",
            _ => "ms",
        }
    }

    pub fn value(self, snapshot: &RunSnapshot) -> Option<f64> {
        match self {
            Field::LossPercent => Some(snapshot.loss_percent),
            Field::Min => snapshot.min,
            Field::Max => snapshot.max,
            Field::Avg => snapshot.avg,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDelta {
    pub field: Field,
    pub previous: Option<f64>,
    pub current: Option<f64>,
}

impl FieldDelta {
    /// `current - previous`, or `None` when either side has no data.
    pub fn delta(&self) -> Option<f64> {
        match (self.current, self.previous) {
            (Some(current), Some(previous)) => Some(current - previous),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub timestamp: String,
    pub fields: Vec<FieldDelta>,
}

/// One comparison per history entry, in history order.
pub fn compare(current: &RunSnapshot, history: &[RunSnapshot]) -> Vec<Comparison> {
    history
        .iter()
        .map(|previous| Comparison {
            timestamp: previous.timestamp.clone(),
            fields: Field::ALL
                .iter()
                .map(|&field| FieldDelta {
                    field,
                    previous: field.value(previous),
                    current: field.value(current),
                })
                .collect(),
        })
        .collect()
}
