use super::{accessor_pair, RenderedFile, UnitGenerator, UnitKind, UnitPlan};
use crate::console;
use crate::error::Result;
use crate::fields::{self, FieldInfo};
use crate::naming::UnitName;
use crate::project::{ProjectDescriptor, ProjectLayout};
use crate::templates::{render, Template};

/// Serializable shared model, synced from the entity when one exists
#[derive(Debug, Default, Clone, Copy)]
pub struct Model;

impl UnitGenerator for Model {
    fn kind(&self) -> UnitKind {
        UnitKind::Model
    }

    fn plan(
        &self,
        name: &UnitName,
        project: &ProjectDescriptor,
        layout: &ProjectLayout,
    ) -> Result<UnitPlan> {
        let class = name.class_name();
        let pkg = project.root_package.as_str();
        let entity_path = layout
            .java_base
            .join("persistence")
            .join("entities")
            .join(format!("{class}Entity.java"));

        let mut synced = false;
        let (model_fields, imports) = if entity_path.exists() {
            match std::fs::read_to_string(&entity_path) {
                Ok(source) => {
                    console::info(format!("Found Entity: {}", layout.display(&entity_path)));
                    synced = true;
                    sync_from_entity(pkg, &source)
                }
                Err(err) => {
                    console::warning(format!(
                        "Could not parse {}: {}",
                        layout.display(&entity_path),
                        err
                    ));
                    (Vec::new(), Vec::new())
                }
            }
        } else {
            (Vec::new(), Vec::new())
        };

        let models = layout.java_base.join("shared").join("models");
        let model = RenderedFile::new(
            models.join(format!("{class}.java")),
            render_model(pkg, &class, &model_fields, &imports),
        );
        let model = if synced {
            model.labelled("synced from entity")
        } else {
            model
        };

        Ok(UnitPlan {
            files: vec![model],
            directories: vec![models],
        })
    }

    fn next_steps(&self, name: &UnitName, project: &ProjectDescriptor) -> Vec<String> {
        vec![
            "Import in your code:".to_string(),
            format!(
                "  import {}.shared.models.{};",
                project.root_package,
                name.class_name()
            ),
        ]
    }
}

/// Model fields and imports derived from an entity source
fn sync_from_entity(pkg: &str, source: &str) -> (Vec<FieldInfo>, Vec<String>) {
    let model_fields: Vec<FieldInfo> = fields::extract_fields(source)
        .into_iter()
        .filter(|f| f.name != "id")
        .map(|f| FieldInfo::new(fields::to_model_type(&f.ty), f.name))
        .collect();

    // the model lives in this package already
    let own_package = format!("{pkg}.shared.models.");
    let imports = fields::retain_imports(&fields::extract_imports(source), &model_fields)
        .into_iter()
        .filter(|import| !import.starts_with(&own_package))
        .collect();

    (model_fields, imports)
}

pub(crate) fn render_model(
    pkg: &str,
    class: &str,
    model_fields: &[FieldInfo],
    imports: &[String],
) -> String {
    let import_block: String = imports
        .iter()
        .map(|import| format!("import {import};\n"))
        .collect();

    let (field_block, accessors) = if model_fields.is_empty() {
        (
            "    // Add your Model fields here, e.g.\n    // private String name\n\n".to_string(),
            "\n    // Add getters and setters for your fields\n".to_string(),
        )
    } else {
        let field_block: String = model_fields
            .iter()
            .map(|f| format!("    private {} {};\n", f.ty, f.name))
            .chain(std::iter::once("\n".to_string()))
            .collect();
        let accessors: String = model_fields
            .iter()
            .map(|f| format!("\n{}", accessor_pair(&f.ty, &f.name)))
            .collect();
        (field_block, accessors)
    };

    render(
        Template::Model,
        &[
            ("package", pkg),
            ("imports", import_block.as_str()),
            ("class", class),
            ("fields", field_block.as_str()),
            ("accessors", accessors.as_str()),
        ],
    )
}
