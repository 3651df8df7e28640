use serde_json::{json, Value};

/// Rendering collaborator. Handlers assemble named context values and
/// hand them over; markup is not this service's business.
pub trait Renderer: Send + Sync {
    fn render(&self, template: &str, context: Value) -> String;
}

/// Default collaborator: emits the template name and its context as a
/// JSON document.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, template: &str, context: Value) -> String {
        json!({ "template": template, "context": context }).to_string()
    }
}
