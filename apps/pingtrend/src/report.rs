use pingtrend_model::RunSnapshot;
use pingtrend_stats::{compare, FieldDelta};

pub fn render_comparison(current: &RunSnapshot, history: &[RunSnapshot]) -> String {
    if history.is_empty() {
        return "No previous data for comparison.\n".to_string();
    }

    let mut out = String::from("\n=== Historical Comparison ===\n");
    for (index, comparison) in compare(current, history).iter().enumerate() {
        out.push_str(&format!(
            "\nComparison #{} ({}):\n",
            index + 1,
            comparison.timestamp
        ));
        for delta in &comparison.fields {
            out.push_str(&delta_line(delta));
        }
    }
    out
}

fn delta_line(delta: &FieldDelta) -> String {
    let label = delta.field.label();
    let unit = delta.field.unit();
    match (delta.previous, delta.current, delta.delta()) {
        (Some(old), Some(cur), Some(diff)) => {
            format!("{label}: {old:.2}{unit} -> {cur:.2}{unit} ({diff:+.2}{unit})\n")
        }
        _ => format!("{label}: No data available.\n"),
    }
}

pub fn render_current(stats: &RunSnapshot) -> String {
    let latency = match (stats.min, stats.max, stats.avg) {
        (Some(min), Some(max), Some(avg)) => {
            format!("Latency: Min={min:.2}ms, Max={max:.2}ms, Avg={avg:.2}ms\n")
        }
        _ => "Latency: No data available.\n".to_string(),
    };
    format!(
        "\n=== Current Test Results ===\n\
         Target: {}\n\
         Timestamp: {}\n\
         Packets: Sent={}, Received={}\n\
         Packet Loss: {:.1}%\n\
         {latency}",
        stats.target, stats.timestamp, stats.sent, stats.received, stats.loss_percent
    )
}
