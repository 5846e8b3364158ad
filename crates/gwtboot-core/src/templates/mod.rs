//! Built-in code templates and placeholder rendering
//!
//! Every artifact a generator writes comes from one file under
//! `crates/gwtboot-core/templates`, compiled into the binary. Templates hold
//! `{{key}}` placeholders only; anything conditional (field lists, import
//! blocks, the entity mapper) is computed by the caller and bound as a single
//! value.

/// The fixed template catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    ModuleDescriptor,
    Presenter,
    View,
    ViewMarkup,
    Controller,
    ActivityPage,
    Component,
    ComponentMarkup,
    ComponentStyle,
    Model,
    Entity,
    EntityMapper,
    Repository,
    ServiceInterface,
    ServiceAsync,
    ServiceImpl,
}

impl Template {
    pub const ALL: [Template; 16] = [
        Template::ModuleDescriptor,
        Template::Presenter,
        Template::View,
        Template::ViewMarkup,
        Template::Controller,
        Template::ActivityPage,
        Template::Component,
        Template::ComponentMarkup,
        Template::ComponentStyle,
        Template::Model,
        Template::Entity,
        Template::EntityMapper,
        Template::Repository,
        Template::ServiceInterface,
        Template::ServiceAsync,
        Template::ServiceImpl,
    ];

    /// Raw template text
    pub fn source(self) -> &'static str {
        match self {
            Template::ModuleDescriptor => {
                include_str!("../../templates/module_descriptor.gwt.xml.tmpl")
            }
            Template::Presenter => include_str!("../../templates/presenter.java.tmpl"),
            Template::View => include_str!("../../templates/view.java.tmpl"),
            Template::ViewMarkup => include_str!("../../templates/view.ui.xml.tmpl"),
            Template::Controller => include_str!("../../templates/controller.java.tmpl"),
            Template::ActivityPage => include_str!("../../templates/activity_page.html.tmpl"),
            Template::Component => include_str!("../../templates/component.java.tmpl"),
            Template::ComponentMarkup => include_str!("../../templates/component.ui.xml.tmpl"),
            Template::ComponentStyle => include_str!("../../templates/component_style.css.tmpl"),
            Template::Model => include_str!("../../templates/model.java.tmpl"),
            Template::Entity => include_str!("../../templates/entity.java.tmpl"),
            Template::EntityMapper => include_str!("../../templates/entity_mapper.java.tmpl"),
            Template::Repository => include_str!("../../templates/repository.java.tmpl"),
            Template::ServiceInterface => include_str!("../../templates/service.java.tmpl"),
            Template::ServiceAsync => include_str!("../../templates/service_async.java.tmpl"),
            Template::ServiceImpl => include_str!("../../templates/service_impl.java.tmpl"),
        }
    }
}

/// Render `template`, replacing each `{{key}}` with its bound value
pub fn render(template: Template, bindings: &[(&str, &str)]) -> String {
    render_str(template.source(), bindings)
}

/// Simple template rendering: replaces {{key}} with value.
pub fn render_str(template: &str, bindings: &[(&str, &str)]) -> String {
    let mut output = template.to_string();
    for (key, value) in bindings {
        output = output.replace(&format!("{{{{{}}}}}", key), value);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_every_occurrence() {
        let out = render_str("{{a}}-{{b}}-{{a}}", &[("a", "x"), ("b", "y")]);
        assert_eq!(out, "x-y-x");
    }

    #[test]
    fn test_unbound_placeholders_are_left_alone() {
        assert_eq!(render_str("{{missing}}", &[("a", "x")]), "{{missing}}");
    }

    #[test]
    fn test_java_braces_survive() {
        let out = render_str("class {{class}} {\n}", &[("class", "Foo")]);
        assert_eq!(out, "class Foo {\n}");
    }

    #[test]
    fn test_presenter_is_fully_bound() {
        let out = render(
            Template::Presenter,
            &[("package", "com.acme"), ("name", "dashboard"), ("class", "Dashboard")],
        );
        assert!(out.starts_with("package com.acme.activities.dashboard.client;"));
        assert!(out.contains("public class DashboardPresenter extends ViewPresenter<DashboardView>"));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_catalog_is_not_empty() {
        for template in Template::ALL {
            assert!(!template.source().trim().is_empty(), "{:?} is empty", template);
        }
    }
}
