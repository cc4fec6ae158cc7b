use crate::model::components::Component;
use crate::model::features::FeatureId;
use crate::model::ScoringModel;
use crate::types::report::{Explanation, ScoreResult};

pub fn to_markdown(result: &ScoreResult) -> String {
    let mut output = String::new();
    output.push_str("# Creative Score\n\n");
    output.push_str(&format!(
        "Prediction score: {:.2} ({})\n\n",
        result.prediction_score,
        result.tag_label.label()
    ));
    output.push_str(&format!("Z score: {:.4}\n\n", result.z_score));

    output.push_str("## Component Scores\n\n");
    for component in Component::ALL {
        output.push_str(&format!(
            "- {}: {:.2}\n",
            component.name(),
            result.component_scores.get(component)
        ));
    }
    output.push('\n');

    output.push_str("## Context\n\n");
    output.push_str(&format!(
        "- industry: {}\n- goal: {}\n",
        result.context_used.industry, result.context_used.goal
    ));
    output
}

pub fn explanation_to_markdown(explanation: &Explanation) -> String {
    let mut output = to_markdown(&explanation.result);
    output.push_str("\n## Features\n\n");
    output.push_str("| feature | description | value | weight | contribution |\n");
    output.push_str("|---|---|---:|---:|---:|\n");
    output.push_str(&format!("| bias | | | | {:.4} |\n", explanation.bias));
    for item in &explanation.features {
        output.push_str(&format!(
            "| {} | {} | {} | {:.4} | {:.4} |\n",
            item.feature,
            item.label,
            format_value(item.feature, item.value),
            item.weight,
            item.contribution
        ));
    }
    output
}

pub fn model_to_markdown(model: &ScoringModel) -> String {
    let mut output = String::new();
    output.push_str("# Scoring Model\n\n");
    output.push_str(&format!("Bias: {:.4}\n\n", model.linear().bias));

    output.push_str("## Components\n\n");
    for component in Component::ALL {
        let Some(spec) = model.partition().spec(component) else {
            continue;
        };
        let names = spec
            .features
            .iter()
            .map(|id| format!("{} ({:.4})", id.name(), model.linear().weight(*id)))
            .collect::<Vec<_>>();
        output.push_str(&format!(
            "- {} (max {:.2}): {}\n",
            component.name(),
            spec.max_score,
            names.join(", ")
        ));
    }

    let thresholds = model.thresholds();
    output.push_str("\n## Tags\n\n");
    output.push_str(&format!(
        "- to scale: >= {:.2}\n- to iterate: >= {:.2}\n- to kill: < {:.2}\n",
        thresholds.scale, thresholds.iterate, thresholds.iterate
    ));

    let industries = model
        .keywords()
        .pain_points
        .keys()
        .map(String::as_str)
        .collect::<Vec<_>>();
    output.push_str("\n## Keywords\n\n");
    output.push_str(&format!(
        "- pain point industries: {}\n- incentive phrases: {}\n",
        industries.join(", "),
        model.keywords().incentives.len()
    ));
    output
}

fn format_value(feature: &str, value: f64) -> String {
    match FeatureId::from_name(feature) {
        Some(id) if id.is_pass_through() => format!("{value:.2}"),
        _ => format!("{value:.0}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::components::ComponentScores;
    use crate::model::tag::Tag;
    use crate::types::report::{ContextUsed, FeatureContribution};

    fn result() -> ScoreResult {
        ScoreResult {
            prediction_score: 64.5,
            tag_label: Tag::Iterate,
            component_scores: ComponentScores {
                hook: 10.0,
                hold: 11.0,
                ctr: 12.0,
                roas: 13.0,
            },
            z_score: 0.5967,
            context_used: ContextUsed {
                industry: "tech".to_string(),
                goal: "awareness".to_string(),
            },
        }
    }

    #[test]
    fn markdown_report_contains_sections() {
        let rendered = to_markdown(&result());
        assert!(rendered.contains("# Creative Score"));
        assert!(rendered.contains("Prediction score: 64.50 (to iterate)"));
        assert!(rendered.contains("## Component Scores"));
        assert!(rendered.contains("- ROAS: 13.00"));
        assert!(rendered.contains("- industry: tech"));
    }

    #[test]
    fn explanation_lists_each_feature() {
        let explanation = Explanation {
            bias: 0.2109,
            features: vec![
                FeatureContribution {
                    feature: "F1",
                    label: "primary focus on product",
                    value: 1.0,
                    weight: 0.54,
                    contribution: 0.54,
                },
                FeatureContribution {
                    feature: "F13",
                    label: "whitespace ratio",
                    value: 0.35,
                    weight: 0.0775,
                    contribution: 0.027125,
                },
            ],
            result: result(),
        };
        let rendered = explanation_to_markdown(&explanation);
        assert!(rendered.contains("| F1 | primary focus on product | 1 | 0.5400 | 0.5400 |"));
        assert!(rendered.contains("| F13 | whitespace ratio | 0.35 |"));
    }

    #[test]
    fn model_summary_lists_components_and_thresholds() {
        let rendered = model_to_markdown(&ScoringModel::default());
        assert!(rendered.contains("Bias: 0.2109"));
        assert!(rendered.contains("- Hook (max 35.00): F1 (0.5400)"));
        assert!(rendered.contains("- to scale: >= 70.00"));
        assert!(rendered.contains("fashion"));
    }
}
