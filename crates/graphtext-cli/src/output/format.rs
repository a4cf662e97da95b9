use graphtext_core::{IndexDefinition, Outcome, RebuildResult};

use super::OutputFormat;

pub fn format_rebuild_result(result: &RebuildResult, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(result).unwrap_or_default(),
        OutputFormat::Text => format_rebuild_result_text(result),
    }
}

fn format_rebuild_result_text(result: &RebuildResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("Index:     {}\n", result.index_name));
    out.push_str(&format!("Run:       {}\n", result.run_id));
    match &result.outcome {
        Outcome::Success if result.dry_run => out.push_str("Outcome:   planned (dry run)\n"),
        Outcome::Success => out.push_str("Outcome:   rebuilt\n"),
        Outcome::Failure { step, reason } => {
            out.push_str(&format!("Outcome:   failed while {step}: {reason}\n"))
        }
    }
    if !result.dry_run {
        let dropped = if result.dropped_existing {
            "existing index dropped"
        } else {
            "no existing index"
        };
        out.push_str(&format!("Previous:  {dropped}\n"));
    }
    out.push_str(&format!("Labels:    {} found\n", result.labels_found));
    if let Some(def) = &result.definition {
        out.push_str(&format!("Statement: {}\n", def.statement));
    }

    if !result.step_durations.is_empty() {
        out.push_str("\n--- Steps ---\n");
        for timing in &result.step_durations {
            let marker = if timing.succeeded { "" } else { " [FAILED]" };
            out.push_str(&format!(
                "  {:<11} {:>9.2} ms{marker}\n",
                timing.step.as_str(),
                timing.duration.as_secs_f64() * 1000.0
            ));
        }
    }
    out.push_str(&format!(
        "Total:     {:.2} ms",
        result.total.as_secs_f64() * 1000.0
    ));

    out
}

pub fn format_definition(def: &IndexDefinition, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(def).unwrap_or_default(),
        OutputFormat::Text => def.statement.clone(),
    }
}
