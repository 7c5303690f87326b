//! Router configuration: the swappable data behind request routing.

use medibot_domain::{IntentClassifier, IntentRoutes, PromptTemplate};

/// Everything the router needs besides the provider.
///
/// Keyword lists, link targets and the prompt template are data, so tests
/// and deployments can replace them without touching routing logic.
#[derive(Debug, Clone, Default)]
pub struct RouterConfig {
    pub classifier: IntentClassifier,
    pub routes: IntentRoutes,
    pub template: PromptTemplate,
}

impl RouterConfig {
    pub fn with_classifier(mut self, classifier: IntentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_routes(mut self, routes: IntentRoutes) -> Self {
        self.routes = routes;
        self
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }
}
