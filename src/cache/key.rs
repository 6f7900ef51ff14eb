//! Cache keys

use std::fmt;

/// Resource name plus ordered parameters. Two keys are equal only when both
/// match exactly, so callers should push params in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: String,
    params: Vec<(String, String)>,
}

impl QueryKey {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    /// Adds the param only when `value` is `Some` and non-empty
    pub fn opt_param<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value.map(|v| v.to_string()).filter(|v| !v.is_empty()) {
            Some(v) => self.param(name, v),
            None => self,
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resource)?;
        for (i, (k, v)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, k, v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let key = QueryKey::new("orders")
            .param("account_id", "a1")
            .opt_param("status", Some("pending"))
            .opt_param::<&str>("search", None)
            .opt_param("date", Some(""));
        assert_eq!(key.to_string(), "orders?account_id=a1&status=pending");
        assert_eq!(QueryKey::new("menu").to_string(), "menu");
    }

    #[test]
    fn test_param_order_matters() {
        let a = QueryKey::new("x").param("a", 1).param("b", 2);
        let b = QueryKey::new("x").param("b", 2).param("a", 1);
        assert_ne!(a, b);
    }
}
