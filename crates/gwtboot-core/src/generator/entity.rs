use super::{accessor_pair, RenderedFile, UnitGenerator, UnitKind, UnitPlan};
use crate::console;
use crate::error::Result;
use crate::fields::{self, FieldInfo};
use crate::naming::{to_snake_case, UnitName};
use crate::project::{ProjectDescriptor, ProjectLayout};
use crate::templates::{render, Template};
use std::collections::BTreeSet;

/// JPA entity plus repository, seeded from the shared model when one exists
#[derive(Debug, Default, Clone, Copy)]
pub struct Entity;

impl UnitGenerator for Entity {
    fn kind(&self) -> UnitKind {
        UnitKind::Entity
    }

    fn plan(
        &self,
        name: &UnitName,
        project: &ProjectDescriptor,
        layout: &ProjectLayout,
    ) -> Result<UnitPlan> {
        let class = name.class_name();
        let model_path = layout
            .java_base
            .join("shared")
            .join("models")
            .join(format!("{class}.java"));

        let model_fields = match std::fs::read_to_string(&model_path) {
            Ok(source) => {
                console::info(format!("Found Model: {}", layout.display(&model_path)));
                let found = fields::extract_fields(&source);
                console::info(format!("Extracted {} field(s) from the model", found.len()));
                found
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no model at {}", model_path.display());
                Vec::new()
            }
            Err(err) => {
                console::warning(format!(
                    "Could not read {}: {}",
                    layout.display(&model_path),
                    err
                ));
                Vec::new()
            }
        };

        let persistent: Vec<FieldInfo> = model_fields
            .iter()
            .filter(|f| f.name != "id")
            .map(|f| FieldInfo::new(fields::to_persistence_type(&f.ty), f.name.clone()))
            .collect();

        let pkg = project.root_package.as_str();
        let entities = layout.java_base.join("persistence").join("entities");
        let repositories = layout.java_base.join("persistence").join("repositories");

        let entity = RenderedFile::new(
            entities.join(format!("{class}Entity.java")),
            render_entity(pkg, &class, &persistent),
        );
        let entity = if persistent.is_empty() {
            entity
        } else {
            entity.labelled("with mapper")
        };

        Ok(UnitPlan {
            files: vec![
                entity,
                RenderedFile::new(
                    repositories.join(format!("{class}Repository.java")),
                    render(
                        Template::Repository,
                        &[("package", pkg), ("class", class.as_str())],
                    ),
                ),
            ],
            directories: vec![entities, repositories],
        })
    }

    fn next_steps(&self, name: &UnitName, _project: &ProjectDescriptor) -> Vec<String> {
        let class = name.class_name();
        vec![
            "Next steps:".to_string(),
            format!("  1. Review the fields and relations in {class}Entity.java"),
            format!("  2. Add custom query methods to {class}Repository.java"),
        ]
    }
}

/// Full entity class body for `columns` (already in persistence types)
pub(crate) fn render_entity(pkg: &str, class: &str, columns: &[FieldInfo]) -> String {
    let mut imports = String::new();
    let mut field_block = String::new();
    let mut accessors = String::new();
    let mut mapper = String::new();

    if !columns.is_empty() {
        let names: BTreeSet<String> = columns
            .iter()
            .flat_map(|f| fields::type_names(&f.ty))
            .collect();
        let uses = |package: &str| {
            names
                .iter()
                .any(|n| n != "Date" && fields::standard_package(n) == Some(package))
        };
        let needs_util = uses("java.util");

        let mut lines = vec![
            "import org.mapstruct.Mapper;".to_string(),
            "import org.mapstruct.MappingConstants;".to_string(),
            "import org.mapstruct.factory.Mappers;".to_string(),
        ];
        if names.contains("Date") && !needs_util {
            lines.push("import java.util.Date;".to_string());
        }
        if uses("java.math") {
            lines.push("import java.math.*;".to_string());
        }
        if uses("java.time") {
            lines.push("import java.time.*;".to_string());
        }
        if needs_util {
            lines.push("import java.util.*;".to_string());
        }
        lines.push(format!("import {pkg}.shared.models.{class};"));
        imports = lines.join("\n");

        for field in columns {
            let relation = fields::classify(&field.ty);
            field_block.push_str(&format!(
                "    {}\n    private {} {};\n\n",
                relation.annotation(),
                field.ty,
                field.name
            ));
            accessors.push_str(&accessor_pair(&field.ty, &field.name));
            accessors.push('\n');
        }

        mapper = render(Template::EntityMapper, &[("class", class)]);
    }

    let table = to_snake_case(class);
    render(
        Template::Entity,
        &[
            ("package", pkg),
            ("imports", imports.as_str()),
            ("table", table.as_str()),
            ("class", class),
            ("fields", field_block.as_str()),
            ("accessors", accessors.as_str()),
            ("mapper", mapper.as_str()),
        ],
    )
}
