//! Filter chain shared by all trigger filters

use tracing::debug;

use super::response::FilterResponse;

/// A single predicate of a trigger filter chain.
///
/// Returning `false` means the event must not trigger the pipeline; the
/// filter then records exactly one reason in `response`. Returning `true`
/// must leave the reasons untouched.
pub trait WebhookFilter: Send + Sync {
    /// Short identifier used in rejection reasons
    fn name(&self) -> &'static str;

    fn do_filter(&self, response: &mut FilterResponse) -> bool;
}

/// Ordered filters evaluated against one response.
///
/// Evaluation stops at the first rejecting filter. An empty chain passes.
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn WebhookFilter>>,
}

impl FilterChain {
    pub fn push(mut self, filter: impl WebhookFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn do_filter(&self, response: &mut FilterResponse) -> bool {
        for filter in &self.filters {
            if !filter.do_filter(response) {
                debug!(filter = filter.name(), "Filter chain stopped");
                return false;
            }
        }
        true
    }
}
