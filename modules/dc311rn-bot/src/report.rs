//! The per-run report — the bot's only output.

use chrono::{DateTime, Utc};

/// Terminal outcome for one actionable post.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    Replied,
    /// A referenced service request does not exist.
    NotFound { detail: String },
    /// Lookup or posting failed for this post; siblings were unaffected.
    Errored { detail: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostOutcome {
    pub post_id: String,
    pub outcome: ProcessOutcome,
}

/// Aggregate of one run: classification buckets by post id, one outcome per
/// actionable post, and the threshold the run used. Logged, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub threshold: DateTime<Utc>,
    pub no_identifier: Vec<String>,
    pub already_replied: Vec<String>,
    pub outside_window: Vec<String>,
    pub outcomes: Vec<PostOutcome>,
}

impl RunReport {
    pub fn replied(&self) -> usize {
        self.count(|o| matches!(o, ProcessOutcome::Replied))
    }

    pub fn not_found(&self) -> usize {
        self.count(|o| matches!(o, ProcessOutcome::NotFound { .. }))
    }

    pub fn errored(&self) -> usize {
        self.count(|o| matches!(o, ProcessOutcome::Errored { .. }))
    }

    fn count(&self, pred: impl Fn(&ProcessOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.outcome)).count()
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Run Complete ===")?;
        writeln!(f, "Threshold:        {}", self.threshold)?;
        writeln!(f, "No identifier:    {}", self.no_identifier.len())?;
        writeln!(f, "Already replied:  {}", self.already_replied.len())?;
        writeln!(f, "Outside window:   {}", self.outside_window.len())?;
        writeln!(f, "Actionable:       {}", self.outcomes.len())?;
        writeln!(f, "  Replied:   {}", self.replied())?;
        writeln!(f, "  Not found: {}", self.not_found())?;
        writeln!(f, "  Errored:   {}", self.errored())?;
        for po in &self.outcomes {
            match &po.outcome {
                ProcessOutcome::Replied => writeln!(f, "  {} replied", po.post_id)?,
                ProcessOutcome::NotFound { detail } => {
                    writeln!(f, "  {} not found: {}", po.post_id, detail)?
                }
                ProcessOutcome::Errored { detail } => {
                    writeln!(f, "  {} errored: {}", po.post_id, detail)?
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_outcomes_by_kind() {
        let report = RunReport {
            threshold: Utc::now(),
            no_identifier: vec!["a".to_string()],
            already_replied: vec![],
            outside_window: vec![],
            outcomes: vec![
                PostOutcome {
                    post_id: "b".to_string(),
                    outcome: ProcessOutcome::Replied,
                },
                PostOutcome {
                    post_id: "c".to_string(),
                    outcome: ProcessOutcome::NotFound {
                        detail: "service request 99-99999999 does not exist".to_string(),
                    },
                },
                PostOutcome {
                    post_id: "d".to_string(),
                    outcome: ProcessOutcome::Errored {
                        detail: "could not post reply".to_string(),
                    },
                },
            ],
        };

        assert_eq!(report.replied(), 1);
        assert_eq!(report.not_found(), 1);
        assert_eq!(report.errored(), 1);

        let rendered = report.to_string();
        assert!(rendered.contains("Actionable:       3"));
        assert!(rendered.contains("c not found"));
    }
}
