//! Verdicts and counterexample reports.
//!
//! A run either satisfies the end-of-cycle property within its cycle bound or
//! produces a [`Counterexample`]. Both render as Markdown for people and as
//! JSON for tooling.

use std::fmt::{self, Write as _};

use cli_defs::ReportFormat;
use serde::Serialize;

use crate::{
    driver::{CycleRecord, RunSummary},
    error::InvariantViolation,
};

/// Shape of a checked property.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyPattern {
    /// The expression holds at the end of every cycle.
    Invariant,
    /// The expression never holds at the end of a cycle.
    Forbidden,
}

impl PropertyPattern {
    /// Natural-language form of the pattern applied to `expression`.
    #[must_use]
    pub fn describe(self, expression: &str) -> String {
        match self {
            Self::Invariant => {
                format!("`{expression}` is always true at the end of the PLC cycle.")
            }
            Self::Forbidden => {
                format!("`{expression}` is impossible at the end of the PLC cycle.")
            }
        }
    }
}

/// A named property over the instance variables.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Property {
    /// Pattern applied to the expression.
    pub pattern: PropertyPattern,
    /// Boolean expression in function-block syntax.
    pub expression: &'static str,
}

impl Property {
    /// Natural-language description.
    #[must_use]
    pub fn describe(&self) -> String { self.pattern.describe(self.expression) }
}

/// The property asserted at end of every cycle.
pub const END_OF_CYCLE_RANGE: Property = Property {
    pattern: PropertyPattern::Invariant,
    expression: "instance.Pressure_LOW >= 0 AND instance.Pressure_LOW <= 65535",
};

/// The cycle that failed the assertion, plus the cycles before it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Counterexample {
    /// Violated property.
    pub property: Property,
    /// State at the failing assertion.
    pub failing: CycleRecord,
    /// Passing cycles that immediately preceded the failure, oldest first.
    /// Empty unless history recording was enabled, and no longer than the
    /// driver's history limit.
    pub history: Vec<CycleRecord>,
}

impl Counterexample {
    /// Counterexample against [`END_OF_CYCLE_RANGE`].
    #[must_use]
    pub const fn new(failing: CycleRecord, history: Vec<CycleRecord>) -> Self {
        Self {
            property: END_OF_CYCLE_RANGE,
            failing,
            history,
        }
    }

    /// Every recorded cycle, failing cycle last.
    pub fn cycles(&self) -> impl Iterator<Item = &CycleRecord> {
        self.history.iter().chain(std::iter::once(&self.failing))
    }

    /// Render the variable-by-cycle table.
    #[must_use]
    pub fn to_markdown(&self) -> String { MarkdownTable(self).to_string() }
}

struct MarkdownTable<'a>(&'a Counterexample);

type Column = fn(&CycleRecord) -> String;

const ROWS: [(&str, Column); 5] = [
    ("instance.Pressure_LOW", |r| format!("{:?}", r.instance.pressure_low)),
    ("instance.Motor_Critical", |r| r.instance.motor_critical.to_string()),
    ("instance.Threshold", |r| format!("{:?}", r.instance.threshold)),
    ("BoC", |r| r.markers.boc.to_string()),
    ("EoC", |r| r.markers.eoc.to_string()),
];

impl fmt::Display for MarkdownTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counterexample = self.0;
        writeln!(f, "### Counterexample Details")?;
        writeln!(f)?;
        writeln!(f, "**Property:** {}", counterexample.property.describe())?;
        writeln!(f)?;
        let mut header = String::from("| Variable |");
        let mut rule = String::from("|---|");
        for record in counterexample.cycles() {
            write!(header, " Cycle {} |", record.cycle)?;
            rule.push_str("---|");
        }
        writeln!(f, "{header}")?;
        writeln!(f, "{rule}")?;
        for (name, column) in ROWS {
            write!(f, "| {name} |")?;
            for record in counterexample.cycles() {
                write!(f, " {} |", column(record))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Outcome of a run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// No violation within the cycle bound.
    Satisfied {
        /// Cycles completed.
        cycles: u64,
        /// Non-finite samples the filter discarded.
        rejected_samples: u64,
    },
    /// The end-of-cycle assertion failed.
    Violated(Counterexample),
}

impl Verdict {
    /// Build a verdict from the result of [`crate::driver::VerificationLoop::run`].
    #[must_use]
    pub fn from_run(outcome: Result<RunSummary, InvariantViolation>) -> Self {
        match outcome {
            Ok(summary) => Self::Satisfied {
                cycles: summary.cycles,
                rejected_samples: summary.rejected_samples,
            },
            Err(violation) => Self::Violated(violation.into_counterexample()),
        }
    }

    /// `"satisfied"` or `"violated"`.
    #[must_use]
    pub const fn status(&self) -> &'static str {
        match self {
            Self::Satisfied { .. } => "satisfied",
            Self::Violated(_) => "violated",
        }
    }

    /// Returns `true` for [`Verdict::Violated`].
    #[must_use]
    pub const fn is_violated(&self) -> bool { matches!(self, Self::Violated(_)) }

    /// Render the verdict in `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(&self, format: ReportFormat) -> Result<String, serde_json::Error> {
        match format {
            ReportFormat::Json => serde_json::to_string_pretty(self),
            ReportFormat::Markdown => Ok(self.to_markdown()),
        }
    }

    fn to_markdown(&self) -> String {
        let mut out = format!(
            "## Verification Result\n\n**Status:** {}\n\n**Property:** {}\n",
            self.status(),
            END_OF_CYCLE_RANGE.describe()
        );
        match self {
            Self::Satisfied {
                cycles,
                rejected_samples,
            } => {
                out.push_str(&format!(
                    "\nNo violation in {cycles} cycles ({rejected_samples} non-finite samples \
                     discarded).\n"
                ));
            }
            Self::Violated(counterexample) => {
                out.push('\n');
                out.push_str(&counterexample.to_markdown());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::{function_block::MotorControl, markers::CycleMarkers};

    fn record(cycle: u64, pressure_low: f32, motor_critical: bool, eoc: bool) -> CycleRecord {
        CycleRecord {
            cycle,
            instance: MotorControl {
                pressure_low,
                motor_critical,
                ..MotorControl::new()
            },
            markers: CycleMarkers { boc: false, eoc },
            rejected_samples: 0,
        }
    }

    #[fixture]
    fn counterexample() -> Counterexample {
        Counterexample::new(
            record(2, 70_000.0, false, true),
            vec![record(1, 10.0, true, true)],
        )
    }

    #[rstest]
    #[case(PropertyPattern::Invariant, "`x` is always true at the end of the PLC cycle.")]
    #[case(PropertyPattern::Forbidden, "`x` is impossible at the end of the PLC cycle.")]
    fn patterns_describe(#[case] pattern: PropertyPattern, #[case] expected: &str) {
        assert_eq!(pattern.describe("x"), expected);
    }

    #[rstest]
    fn markdown_table_has_one_column_per_cycle(counterexample: Counterexample) {
        let table = counterexample.to_markdown();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.first(), Some(&"### Counterexample Details"));
        assert!(table.contains("| Variable | Cycle 1 | Cycle 2 |"));
        assert!(table.contains("|---|---|---|"));
        assert!(table.contains("| instance.Pressure_LOW | 10.0 | 70000.0 |"));
        assert!(table.contains("| instance.Motor_Critical | true | false |"));
        assert!(table.contains("| instance.Threshold | 36464.0 | 36464.0 |"));
        assert!(table.contains("| EoC | true | true |"));
    }

    #[rstest]
    fn cycles_end_with_failure(counterexample: Counterexample) {
        let cycles: Vec<u64> = counterexample.cycles().map(|r| r.cycle).collect();
        assert_eq!(cycles, vec![1, 2]);
    }

    #[rstest]
    fn violated_verdict_renders_json(counterexample: Counterexample) {
        let verdict = Verdict::Violated(counterexample);
        assert!(verdict.is_violated());
        let Ok(json) = verdict.render(ReportFormat::Json) else {
            panic!("verdict should serialize");
        };
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&json) else {
            panic!("rendered JSON should parse");
        };
        assert_eq!(value["status"], "violated");
        assert_eq!(value["failing"]["cycle"], 2);
        assert_eq!(value["history"][0]["instance"]["motor_critical"], true);
        assert_eq!(value["property"]["pattern"], "invariant");
    }

    #[test]
    fn satisfied_verdict_renders_markdown() {
        let verdict = Verdict::from_run(Ok(RunSummary {
            cycles: 10,
            rejected_samples: 2,
        }));
        assert_eq!(verdict.status(), "satisfied");
        let Ok(text) = verdict.render(ReportFormat::Markdown) else {
            panic!("markdown rendering cannot fail");
        };
        assert!(text.contains("**Status:** satisfied"));
        assert!(text.contains("No violation in 10 cycles (2 non-finite samples discarded)."));
    }

    #[rstest]
    fn violated_markdown_embeds_table(counterexample: Counterexample) {
        let verdict = Verdict::Violated(counterexample);
        let Ok(text) = verdict.render(ReportFormat::Markdown) else {
            panic!("markdown rendering cannot fail");
        };
        assert!(text.contains("**Status:** violated"));
        assert!(text.contains("### Counterexample Details"));
    }
}
