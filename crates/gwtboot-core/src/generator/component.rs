use super::{patch_main_module, RenderedFile, UnitGenerator, UnitKind, UnitPlan};
use crate::descriptor::PatchOutcome;
use crate::error::{BootError, Result};
use crate::naming::UnitName;
use crate::project::{find_main_module, ProjectDescriptor, ProjectLayout};
use crate::templates::{render, Template};

/// Reusable UI widget with its own markup and stylesheet
#[derive(Debug, Default, Clone, Copy)]
pub struct Component;

impl UnitGenerator for Component {
    fn kind(&self) -> UnitKind {
        UnitKind::Component
    }

    fn describe(&self, name: &UnitName, project: &ProjectDescriptor) -> Vec<String> {
        vec![
            format!("Component name: {}", name.class_name()),
            format!("Package: {}.client.components", project.root_package),
        ]
    }

    fn plan(
        &self,
        name: &UnitName,
        project: &ProjectDescriptor,
        layout: &ProjectLayout,
    ) -> Result<UnitPlan> {
        if find_main_module(&layout.java_base)?.is_none() {
            return Err(BootError::ProjectNotRecognized(format!(
                "Could not find main GWT module (.gwt.xml) in {}",
                layout.display(&layout.java_base)
            )));
        }

        let class = name.class_name();
        let lower = name.lower();
        let bindings = [
            ("package", project.root_package.as_str()),
            ("class", class.as_str()),
            ("lower", lower.as_str()),
        ];

        let components = layout.java_base.join("client").join("components");
        let resources = components.join("resources").join(&lower);

        Ok(UnitPlan {
            files: vec![
                RenderedFile::new(
                    components.join(format!("{class}.java")),
                    render(Template::Component, &bindings),
                ),
                RenderedFile::new(
                    resources.join(format!("{class}.ui.xml")),
                    render(Template::ComponentMarkup, &bindings),
                ),
                RenderedFile::new(
                    resources.join("style.css"),
                    render(Template::ComponentStyle, &bindings),
                ),
            ],
            directories: vec![components, resources],
        })
    }

    fn finish(&self, layout: &ProjectLayout) -> Result<Option<PatchOutcome>> {
        patch_main_module(layout, "client")
    }

    fn next_steps(&self, name: &UnitName, project: &ProjectDescriptor) -> Vec<String> {
        vec![
            "Import in your code:".to_string(),
            format!(
                "  import {}.client.components.{};",
                project.root_package,
                name.class_name()
            ),
        ]
    }
}
