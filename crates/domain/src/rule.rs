use crate::category::{Action, Category};
use std::sync::Arc;

/// One list's verdict for a domain: which list it came from, what category
/// it is tagged with, and whether that list blocks or allows the domain.
#[derive(Debug, Clone)]
pub struct Rule {
    pub list: Arc<str>,
    pub category: Category,
    pub action: Action,
}

impl Rule {
    pub fn new(list: &str, category: Category, action: Action) -> Self {
        Self {
            list: Arc::from(list),
            category,
            action,
        }
    }
}
