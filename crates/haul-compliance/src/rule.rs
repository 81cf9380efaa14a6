//! # Rules and Rule Sets
//!
//! A [`Rule`] is one regulatory requirement: a tag ([`ViolationKind`]) and
//! a check that returns the violation message when the requirement is not
//! met. A [`RuleSet`] is an ordered list of rules over the same input.
//!
//! Rule sets never short-circuit. Every rule runs and every fired rule is
//! recorded.
//!
//! ## Extensibility
//!
//! New requirements are added by pushing another rule onto a family's set
//! (see `hos::rules()` and friends). Existing rules are not touched.

use std::fmt;

use haul_core::Timestamp;

use crate::policy::{CompliancePolicy, PolicyError};
use crate::result::{ValidationResult, ViolationKind};

/// Inputs shared by every rule: the evaluation instant and thresholds.
///
/// Rules never read the clock; `as_of` is the only notion of now. A context
/// can only be built over a policy that passed [`CompliancePolicy::validate`],
/// however that policy was constructed.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'p> {
    /// The instant the dispatch decision is being made.
    pub as_of: Timestamp,
    policy: &'p CompliancePolicy,
}

impl<'p> EvaluationContext<'p> {
    /// Context at a fixed instant. Fails when the policy is looser than
    /// federal or has unusable thresholds.
    pub fn new(as_of: Timestamp, policy: &'p CompliancePolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self { as_of, policy })
    }

    /// Context at the current instant.
    pub fn now(policy: &'p CompliancePolicy) -> Result<Self, PolicyError> {
        Self::new(Timestamp::now(), policy)
    }

    /// Thresholds in force.
    pub fn policy(&self) -> &'p CompliancePolicy {
        self.policy
    }
}

/// One requirement over input `I`.
pub trait Rule<I: ?Sized>: Send + Sync + fmt::Debug {
    /// The violation this rule reports.
    fn kind(&self) -> ViolationKind;

    /// Returns `Some(message)` when the requirement is violated. The
    /// message must contain `self.kind().fragment()`.
    fn check(&self, input: &I, ctx: &EvaluationContext<'_>) -> Option<String>;
}

/// Ordered, non-short-circuiting collection of rules over input `I`.
pub struct RuleSet<I: ?Sized> {
    rules: Vec<Box<dyn Rule<I>>>,
}

impl<I: ?Sized> fmt::Debug for RuleSet<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rules.iter()).finish()
    }
}

impl<I: ?Sized> Default for RuleSet<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ?Sized> RuleSet<I> {
    /// An empty rule set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule. Rules run in insertion order.
    pub fn with_rule<R: Rule<I> + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Kinds of all rules, in order.
    pub fn kinds(&self) -> Vec<ViolationKind> {
        self.rules.iter().map(|r| r.kind()).collect()
    }

    /// Run every rule and collect one violation per fired rule.
    pub fn evaluate(&self, input: &I, ctx: &EvaluationContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::pass();
        for rule in &self.rules {
            if let Some(message) = rule.check(input, ctx) {
                let kind = rule.kind();
                debug_assert!(
                    message.contains(kind.fragment()),
                    "{kind} message {message:?} lost its contract fragment"
                );
                tracing::debug!(kind = %kind, citation = kind.citation(), %message, "rule fired");
                result.push(kind, message);
            }
        }
        result
    }
}
