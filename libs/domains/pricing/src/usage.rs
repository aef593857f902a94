//! Tag parsing and the billing-detail builder shared by estimators.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::{PricingError, PricingResult};

/// Read-only view over a descriptor's tags.
#[derive(Debug, Clone, Copy)]
pub struct Tags<'a> {
    tags: &'a HashMap<String, String>,
}

impl<'a> Tags<'a> {
    pub fn new(tags: &'a HashMap<String, String>) -> Self {
        Self { tags }
    }

    /// First key present, with its trimmed (possibly empty) value.
    fn raw(&self, keys: &[&'static str]) -> Option<(&'static str, &'a str)> {
        keys.iter()
            .find_map(|k| self.tags.get(*k).map(|v| (*k, v.trim())))
    }

    /// Non-empty value of the first present key.
    pub fn text(&self, keys: &[&'static str]) -> Option<&'a str> {
        self.raw(keys).map(|(_, v)| v).filter(|v| !v.is_empty())
    }

    /// A usage driver: absent is `Ok(None)`; present but empty, negative or
    /// unparsable is an input error.
    pub fn required_quantity(&self, key: &'static str) -> PricingResult<Option<f64>> {
        let Some((_, value)) = self.raw(&[key]) else {
            return Ok(None);
        };
        match parse_quantity(value) {
            Some(q) => Ok(Some(q)),
            None => Err(PricingError::InvalidInput(format!(
                "tag {key} must be a non-negative number, got {value:?}"
            ))),
        }
    }

    /// An optional quantity: absent or invalid values fall back to `default`,
    /// which is recorded in `detail`.
    pub fn quantity_or(
        &self,
        keys: &[&'static str],
        default: f64,
        unit: &str,
        detail: &mut BillingDetail,
    ) -> f64 {
        match self.raw(keys).and_then(|(_, v)| parse_quantity(v)) {
            Some(q) => q,
            None => {
                detail.defaulted(keys[0], format!("{default}{unit}"));
                default
            }
        }
    }

    /// An optional enum-valued tag. Unrecognized values count as absent.
    pub fn choice_or<T>(&self, keys: &[&'static str], default: T, detail: &mut BillingDetail) -> T
    where
        T: FromStr + Display + Copy,
    {
        self.choice_or_else(keys, None, default, detail)
    }

    /// Like `choice_or`, but an absent or unrecognized tag falls back to
    /// `inferred` before the default. Only the default is marked.
    pub fn choice_or_else<T>(
        &self,
        keys: &[&'static str],
        inferred: Option<T>,
        default: T,
        detail: &mut BillingDetail,
    ) -> T
    where
        T: FromStr + Display + Copy,
    {
        if let Some(v) = self.text(keys) {
            match T::from_str(v) {
                Ok(parsed) => return parsed,
                Err(_) => detail.note(format!("{} {v:?} not recognized", keys[0])),
            }
        }
        match inferred {
            Some(value) => value,
            None => {
                detail.defaulted(keys[0], default);
                default
            }
        }
    }

    /// An optional boolean tag (true/yes/1/on, false/no/0/off). Absent or
    /// unrecognized values fall back to `default`, recorded in `detail` as
    /// `shown`.
    pub fn flag_or(
        &self,
        keys: &[&'static str],
        default: bool,
        shown: impl Display,
        detail: &mut BillingDetail,
    ) -> bool {
        if let Some((_, v)) = self.raw(keys) {
            match parse_flag(v) {
                Some(flag) => return flag,
                None => detail.note(format!("{} {v:?} not recognized", keys[0])),
            }
        }
        detail.defaulted(keys[0], shown);
        default
    }

    /// Utilization fraction in `0..=1`, if tagged and valid.
    pub fn utilization(&self) -> Option<f64> {
        self.text(&["utilization"])
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|u| (0.0..=1.0).contains(u))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

fn parse_quantity(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|q| q.is_finite() && *q >= 0.0)
}

/// Ordered notes joined into the estimate's billing detail.
#[derive(Debug, Default)]
pub struct BillingDetail {
    parts: Vec<String>,
    defaults: usize,
}

impl BillingDetail {
    pub fn new(headline: impl Into<String>) -> Self {
        Self {
            parts: vec![headline.into()],
            defaults: 0,
        }
    }

    pub fn note(&mut self, note: impl Into<String>) {
        self.parts.push(note.into());
    }

    /// Record `<field> defaulted to <value>`.
    pub fn defaulted(&mut self, field: &str, value: impl Display) {
        self.defaults += 1;
        self.parts.push(format!("{field} defaulted to {value}"));
    }

    pub fn has_defaults(&self) -> bool {
        self.defaults > 0
    }

    pub fn finish(self) -> String {
        self.parts.join("; ")
    }
}
