/// Extracts the round-trip time in milliseconds from `ping` output.
///
/// Understands `time=12.3 ms`, `time=12.3ms` and the Windows `time<1ms`
/// form (reported as 1ms). Returns `None` when no reply line is present.
pub fn parse_reply_latency(text: &str) -> Option<f64> {
    text.lines().find_map(parse_reply_line)
}

fn parse_reply_line(line: &str) -> Option<f64> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    for (i, tok) in tokens.iter().enumerate() {
        let lower = tok.to_ascii_lowercase();
        let value = if let Some(rest) = lower.strip_prefix("time=") {
            rest.to_string()
        } else if let Some(rest) = lower.strip_prefix("time<") {
            rest.to_string()
        } else {
            continue;
        };

        let next = tokens.get(i + 1).copied();
        if let Some(val) = parse_rtt(&value, next) {
            return Some(val);
        }
    }

    None
}

fn parse_rtt(token: &str, next: Option<&str>) -> Option<f64> {
    if let Some(num) = token.strip_suffix("ms") {
        return num.parse::<f64>().ok();
    }

    let val = token.parse::<f64>().ok()?;
    match next {
        Some(next_tok) if next_tok.starts_with("ms") => Some(val),
        _ => None,
    }
}
