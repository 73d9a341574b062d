use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Serialize)]
    struct Counts {
        nodes: usize,
        edges: usize,
    }

    #[test]
    fn raw_is_single_line_json() {
        let rendered = render(&Counts { nodes: 3, edges: 2 }, OutputFormat::Raw).unwrap();
        assert_eq!(rendered, r#"{"nodes":3,"edges":2}"#);
    }

    #[test]
    fn json_is_pretty_printed() {
        let rendered = render(&Counts { nodes: 3, edges: 2 }, OutputFormat::Json).unwrap();
        assert_eq!(rendered, "{\n  \"nodes\": 3,\n  \"edges\": 2\n}");
    }
}
