use std::fmt;

use serde::Serialize;

use crate::engine::constants::{
    CA_P_RATIO_MAX, CA_P_RATIO_MIN, ENERGY_DELTA_LIMIT, PROTEIN_DENSITY_MIN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("ok"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    ProteinDensityLow,
    ProteinDensityAdequate,
    CalciumPhosphorusOutOfRange,
    CalciumPhosphorusAligned,
    MicronutrientDataMissing,
    EnergyDeltaFlagged,
}

/// Advisory signal shown next to the numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, severity: Severity, message: String) -> Self {
        Self {
            kind,
            severity,
            message,
        }
    }
}

/// Derived values the classifier reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticInputs {
    pub protein_density: f64,
    pub calcium_phosphorus: Option<f64>,
    pub micronutrients_present: bool,
    pub energy_delta: f64,
}

/// Apply the fixed thresholds.
pub fn classify(inputs: &DiagnosticInputs) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    let density = inputs.protein_density;
    if density >= PROTEIN_DENSITY_MIN {
        out.push(Diagnostic::new(
            DiagnosticKind::ProteinDensityAdequate,
            Severity::Info,
            format!("Protein density adequate ({:.2} g per unit body weight)", density),
        ));
    } else if density > 0.0 {
        out.push(Diagnostic::new(
            DiagnosticKind::ProteinDensityLow,
            Severity::Warning,
            format!(
                "Protein density low ({:.2} g per unit body weight, target {:.1})",
                density, PROTEIN_DENSITY_MIN
            ),
        ));
    }

    if let Some(ratio) = inputs.calcium_phosphorus {
        if (CA_P_RATIO_MIN..=CA_P_RATIO_MAX).contains(&ratio) {
            out.push(Diagnostic::new(
                DiagnosticKind::CalciumPhosphorusAligned,
                Severity::Info,
                format!("Ca:P ratio {:.2} aligned with recommended band", ratio),
            ));
        } else if ratio > 0.0 {
            out.push(Diagnostic::new(
                DiagnosticKind::CalciumPhosphorusOutOfRange,
                Severity::Warning,
                format!(
                    "Ca:P ratio {:.2} outside recommended {:.1}-{:.1}",
                    ratio, CA_P_RATIO_MIN, CA_P_RATIO_MAX
                ),
            ));
        }
    }

    if !inputs.micronutrients_present {
        out.push(Diagnostic::new(
            DiagnosticKind::MicronutrientDataMissing,
            Severity::Warning,
            "Insufficient micronutrient data".to_string(),
        ));
    }

    let delta = inputs.energy_delta;
    if delta.abs() > ENERGY_DELTA_LIMIT {
        let direction = if delta > 0.0 { "above" } else { "below" };
        out.push(Diagnostic::new(
            DiagnosticKind::EnergyDeltaFlagged,
            Severity::Warning,
            format!("Energy {:.0} kcal {} target", delta.abs(), direction),
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(inputs: DiagnosticInputs) -> Vec<DiagnosticKind> {
        classify(&inputs).into_iter().map(|d| d.kind).collect()
    }

    fn quiet() -> DiagnosticInputs {
        DiagnosticInputs {
            micronutrients_present: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_protein_density_boundary() {
        let low = DiagnosticInputs {
            protein_density: 2.4,
            ..quiet()
        };
        assert_eq!(kinds(low), vec![DiagnosticKind::ProteinDensityLow]);

        let adequate = DiagnosticInputs {
            protein_density: 2.5,
            ..quiet()
        };
        assert_eq!(kinds(adequate), vec![DiagnosticKind::ProteinDensityAdequate]);
    }

    #[test]
    fn test_zero_density_silent() {
        assert!(kinds(quiet()).is_empty());
    }

    #[test]
    fn test_ca_p_band_edges() {
        for ratio in [1.1, 1.35, 1.6] {
            let inputs = DiagnosticInputs {
                calcium_phosphorus: Some(ratio),
                ..quiet()
            };
            assert_eq!(kinds(inputs), vec![DiagnosticKind::CalciumPhosphorusAligned]);
        }
        for ratio in [0.5, 1.61, 3.0] {
            let inputs = DiagnosticInputs {
                calcium_phosphorus: Some(ratio),
                ..quiet()
            };
            assert_eq!(
                kinds(inputs),
                vec![DiagnosticKind::CalciumPhosphorusOutOfRange]
            );
        }
    }

    #[test]
    fn test_ca_p_unavailable_or_zero_silent() {
        let unavailable = DiagnosticInputs {
            calcium_phosphorus: None,
            ..quiet()
        };
        assert!(kinds(unavailable).is_empty());

        let zero = DiagnosticInputs {
            calcium_phosphorus: Some(0.0),
            ..quiet()
        };
        assert!(kinds(zero).is_empty());
    }

    #[test]
    fn test_missing_micronutrients() {
        let inputs = DiagnosticInputs::default();
        assert_eq!(kinds(inputs), vec![DiagnosticKind::MicronutrientDataMissing]);
    }

    #[test]
    fn test_energy_delta_threshold_is_strict() {
        let at_limit = DiagnosticInputs {
            energy_delta: -200.0,
            ..quiet()
        };
        assert!(kinds(at_limit).is_empty());

        let over = DiagnosticInputs {
            energy_delta: 250.0,
            ..quiet()
        };
        let diags = classify(&over);
        assert_eq!(diags[0].kind, DiagnosticKind::EnergyDeltaFlagged);
        assert!(diags[0].message.contains("above"));
        assert_eq!(diags[0].severity, Severity::Warning);
    }
}
