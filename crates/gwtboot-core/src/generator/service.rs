use super::{RenderedFile, UnitGenerator, UnitKind, UnitPlan};
use crate::error::Result;
use crate::naming::UnitName;
use crate::project::{ProjectDescriptor, ProjectLayout};
use crate::templates::{render, Template};

/// GWT RPC trio: service interface, async interface and servlet implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct Service;

impl UnitGenerator for Service {
    fn kind(&self) -> UnitKind {
        UnitKind::Service
    }

    fn plan(
        &self,
        name: &UnitName,
        project: &ProjectDescriptor,
        layout: &ProjectLayout,
    ) -> Result<UnitPlan> {
        let class = name.class_name();
        let lower = name.lower();
        let bindings = [
            ("package", project.root_package.as_str()),
            ("name", name.as_str()),
            ("class", class.as_str()),
            ("lower", lower.as_str()),
        ];

        let shared = layout
            .java_base
            .join("shared")
            .join("services")
            .join(name.as_str());
        let services = layout.java_base.join("services");

        Ok(UnitPlan {
            files: vec![
                RenderedFile::new(
                    shared.join(format!("{class}Service.java")),
                    render(Template::ServiceInterface, &bindings),
                ),
                RenderedFile::new(
                    shared.join(format!("{class}ServiceAsync.java")),
                    render(Template::ServiceAsync, &bindings),
                ),
                RenderedFile::new(
                    services.join(format!("{class}ServiceImpl.java")),
                    render(Template::ServiceImpl, &bindings),
                ),
            ],
            directories: vec![shared, services],
        })
    }

    fn next_steps(&self, name: &UnitName, _project: &ProjectDescriptor) -> Vec<String> {
        let class = name.class_name();
        vec![
            "Next steps:".to_string(),
            format!("  1. Add your service methods to {class}Service.java"),
            format!("  2. Add corresponding async methods to {class}ServiceAsync.java"),
            format!("  3. Implement the methods in {class}ServiceImpl.java"),
            String::new(),
            format!("Service endpoint: /{}/service", name.lower()),
        ]
    }
}
