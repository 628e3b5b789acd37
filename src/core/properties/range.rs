//! Range Resolver
//!
//! Turns the range written in an integer type cell, e.g. `integer (0-256)`
//! or `integer (1-(30000000*8))`, into two integers. Upper bounds written as
//! arithmetic are sent to an external evaluation service.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use tracing::{debug, instrument};

use super::error::{Bound, RangeError};

// ============================================================================
// Patterns
// ============================================================================

// The en-dash is accepted because the wiki uses both dashes inconsistently.
static LIMITS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+[-–](?:\d+|\(\d+(?: ?[+\-*/^] ?\d+){0,2}\))").expect("limits regex is valid")
});

static EXPRESSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+ ?[+\-*/^] ?\d+(?: ?[+\-*/^] ?\d+)?").expect("expression regex is valid")
});

/// Upper end of a range as written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpperBound<'a> {
    Literal(&'a str),
    Expression(&'a str),
}

/// The range found inside a type cell, not yet converted to numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeText<'a> {
    pub lower: &'a str,
    pub upper: UpperBound<'a>,
}

/// Locates the first range in `raw`. `None` means the key documents no range.
pub fn find_range(raw: &str) -> Option<RangeText<'_>> {
    let limits = LIMITS.find(raw)?.as_str();
    let (lower, upper) = limits.split_once(['-', '–'])?;
    let upper = match EXPRESSION.find(upper) {
        Some(expr) => UpperBound::Expression(expr.as_str()),
        None => UpperBound::Literal(upper),
    };
    Some(RangeText { lower, upper })
}

fn parse_literal(bound: Bound, text: &str) -> Result<i64, RangeError> {
    text.trim_matches(|c| c == '(' || c == ')')
        .trim()
        .parse()
        .map_err(|_| RangeError::Malformed {
            bound,
            text: text.to_string(),
        })
}

/// Resolves the range in `raw` to `(min, max)`.
///
/// Returns `Ok(None)` when there is no range. The evaluator is only called
/// when the upper bound is an expression; its failure is returned as is and
/// never replaced by a default.
pub async fn resolve_range(
    raw: &str,
    evaluator: &dyn ExpressionEvaluator,
) -> Result<Option<(i64, i64)>, RangeError> {
    let Some(range) = find_range(raw) else {
        return Ok(None);
    };
    let max = match range.upper {
        UpperBound::Expression(expr) => evaluator.evaluate(expr).await?,
        UpperBound::Literal(text) => parse_literal(Bound::Upper, text)?,
    };
    let min = parse_literal(Bound::Lower, range.lower)?;
    Ok(Some((min, max)))
}

// ============================================================================
// Arithmetic Evaluation
// ============================================================================

/// Evaluates an arithmetic expression to an integer.
#[async_trait]
pub trait ExpressionEvaluator: Send + Sync {
    async fn evaluate(&self, expr: &str) -> Result<i64, RangeError>;
}

/// Client for a mathjs-compatible `GET <endpoint>?expr=<expression>` API
/// answering with the result as plain text.
#[derive(Debug, Clone)]
pub struct MathJsEvaluator {
    endpoint: String,
    client: Client,
}

impl MathJsEvaluator {
    pub fn new(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ExpressionEvaluator for MathJsEvaluator {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn evaluate(&self, expr: &str) -> Result<i64, RangeError> {
        let unreachable = |reason: String| RangeError::EvaluatorUnreachable {
            expr: expr.to_string(),
            reason,
        };

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("expr", expr)])
            .send()
            .await
            .map_err(|e| unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unreachable(format!("status {status}")));
        }

        let body = response.text().await.map_err(|e| unreachable(e.to_string()))?;
        let value = parse_number(expr, &body)?;
        debug!(value, "Evaluated upper limit expression");
        Ok(value)
    }
}

/// Parses an evaluator answer. Integers are taken exactly; decimals and
/// exponent notation are rounded, saturating at the `i64` range.
fn parse_number(expr: &str, body: &str) -> Result<i64, RangeError> {
    let text = body.trim();
    if let Ok(value) = text.parse::<i64>() {
        return Ok(value);
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value.round() as i64),
        _ => Err(RangeError::EvaluatorOutput {
            expr: expr.to_string(),
            output: text.to_string(),
        }),
    }
}
