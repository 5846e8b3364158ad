use super::{patch_main_module, RenderedFile, UnitGenerator, UnitKind, UnitPlan};
use crate::descriptor::PatchOutcome;
use crate::error::Result;
use crate::naming::UnitName;
use crate::project::{find_main_module, ProjectDescriptor, ProjectLayout};
use crate::templates::{render, Template};

/// Feature module: presenter, view, markup, controller, module descriptor and page
#[derive(Debug, Default, Clone, Copy)]
pub struct Activity;

impl UnitGenerator for Activity {
    fn kind(&self) -> UnitKind {
        UnitKind::Activity
    }

    fn describe(&self, name: &UnitName, project: &ProjectDescriptor) -> Vec<String> {
        vec![
            format!("Activity name: {}", name.class_name()),
            format!("Package: {}.activities.{}", project.root_package, name),
        ]
    }

    fn plan(
        &self,
        name: &UnitName,
        project: &ProjectDescriptor,
        layout: &ProjectLayout,
    ) -> Result<UnitPlan> {
        let class = name.class_name();
        let main_module =
            find_main_module(&layout.java_base)?.unwrap_or_else(|| "App".to_string());
        let bindings = [
            ("package", project.root_package.as_str()),
            ("name", name.as_str()),
            ("class", class.as_str()),
            ("main_module", main_module.as_str()),
        ];

        let base = layout.java_base.join("activities").join(name.as_str());
        let client = base.join("client");
        let server = base.join("server");
        let pages = layout.resources_base.join("templates").join(name.as_str());

        Ok(UnitPlan {
            files: vec![
                RenderedFile::new(
                    client.join(format!("{class}Presenter.java")),
                    render(Template::Presenter, &bindings),
                ),
                RenderedFile::new(
                    client.join(format!("{class}View.java")),
                    render(Template::View, &bindings),
                ),
                RenderedFile::new(
                    client.join(format!("{class}View.ui.xml")),
                    render(Template::ViewMarkup, &bindings),
                ),
                RenderedFile::new(
                    server.join(format!("{class}Controller.java")),
                    render(Template::Controller, &bindings),
                ),
                RenderedFile::new(
                    base.join(format!("{class}.gwt.xml")),
                    render(Template::ModuleDescriptor, &bindings),
                ),
                RenderedFile::new(pages.join("index.html"), render(Template::ActivityPage, &bindings)),
            ],
            directories: vec![client, base.join("shared"), server, pages],
        })
    }

    fn finish(&self, layout: &ProjectLayout) -> Result<Option<PatchOutcome>> {
        patch_main_module(layout, "shared")
    }

    fn next_steps(&self, name: &UnitName, _project: &ProjectDescriptor) -> Vec<String> {
        vec![format!("Access the activity at: http://localhost:8080/{}", name)]
    }
}
