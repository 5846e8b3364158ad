//! Field extraction from generated Java sources
//!
//! Keeps a shared model and its persistence entity in sync. This is a
//! line-pattern heuristic, not a Java parser: comments, initialisers and
//! unusual modifiers are not understood.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// A `private <type> <name>;` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub ty: String,
    pub name: String,
}

impl FieldInfo {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

/// Association marker a persistence field is stamped with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    ToMany,
    ToOne,
    Plain,
}

impl Relation {
    pub fn annotation(self) -> &'static str {
        match self {
            Relation::ToMany => "@OneToMany",
            Relation::ToOne => "@ManyToOne",
            Relation::Plain => "@Column",
        }
    }
}

/// Suffix marking a persistence-layer type
pub const ENTITY_SUFFIX: &str = "Entity";

const SKIPPED_FIELDS: &[&str] = &["serialVersionUID"];

/// Annotations that mark generated or identity fields
const IDENTITY_MARKERS: &[&str] = &["@Id", "@GeneratedValue", "@Version"];

const PRIMITIVES: &[&str] = &[
    "int", "long", "short", "byte", "char", "float", "double", "boolean",
];

const STANDARD_TYPES: &[&str] = &[
    "Integer",
    "Long",
    "Short",
    "Byte",
    "Character",
    "Float",
    "Double",
    "Boolean",
    "String",
    "BigDecimal",
    "BigInteger",
    "Date",
    "LocalDate",
    "LocalDateTime",
    "LocalTime",
    "Instant",
    "UUID",
];

const CONTAINER_TYPES: &[&str] = &[
    "List",
    "Set",
    "Map",
    "Collection",
    "ArrayList",
    "HashSet",
    "HashMap",
    "LinkedList",
    "LinkedHashSet",
    "LinkedHashMap",
    "TreeSet",
    "TreeMap",
    "Optional",
];

/// `java.lang` types that never need an import
const IMPLICIT_TYPES: &[&str] = &[
    "String",
    "Long",
    "Integer",
    "Boolean",
    "Double",
    "Float",
    "Character",
    "Byte",
    "Short",
    "Object",
];

const DENIED_IMPORT_PREFIXES: &[&str] = &["jakarta.persistence", "javax.persistence", "org.mapstruct"];

/// Types reachable through a wildcard import of the given package
const WILDCARD_PACKAGES: &[(&str, &[&str])] = &[
    (
        "java.util",
        &[
            "List",
            "Set",
            "Map",
            "Collection",
            "ArrayList",
            "HashSet",
            "HashMap",
            "LinkedList",
            "LinkedHashSet",
            "LinkedHashMap",
            "TreeSet",
            "TreeMap",
            "Optional",
            "Date",
            "UUID",
        ],
    ),
    (
        "java.time",
        &["LocalDate", "LocalDateTime", "LocalTime", "Instant", "Duration"],
    ),
    ("java.math", &["BigDecimal", "BigInteger"]),
];

/// Standard package providing `name`, if it is one of the known library types
pub fn standard_package(name: &str) -> Option<&'static str> {
    WILDCARD_PACKAGES
        .iter()
        .find(|(_, members)| members.contains(&name))
        .map(|(package, _)| *package)
}

static FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"private\s+([A-Za-z0-9_<>\[\],\s]+?)\s+([A-Za-z_][A-Za-z0-9_]*)\s*;")
        .expect("valid regex")
});

static DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"private\s+").expect("valid regex"));

static CLASS_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]\w+").expect("valid regex"));

static TO_MANY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(List|Set|Collection|ArrayList|HashSet)<([A-Z]\w+Entity)>").expect("valid regex")
});

static TO_ONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]\w+Entity$").expect("valid regex"));

static IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^import\s+([^;]+);").expect("valid regex"));

/// Field declarations in declaration order
///
/// A field is skipped when an identity marker appears in the text strictly
/// between the previous declaration and this one, so an annotation is only
/// ever attributed to the field right after it.
pub fn extract_fields(source: &str) -> Vec<FieldInfo> {
    let mut fields = Vec::new();
    let mut last_end = 0;

    for caps in FIELD.captures_iter(source) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let window = &source[last_end..whole.start()];
        last_end = whole.end();

        let name = caps[2].trim();
        if SKIPPED_FIELDS.contains(&name) {
            continue;
        }
        if is_annotated_identity(window) {
            tracing::debug!(field = name, "skipping identity field");
            continue;
        }

        fields.push(FieldInfo::new(caps[1].trim(), name));
    }

    fields
}

fn is_annotated_identity(window: &str) -> bool {
    if !IDENTITY_MARKERS.iter().any(|m| window.contains(m)) {
        return false;
    }
    let stripped = IDENTITY_MARKERS
        .iter()
        .fold(window.to_string(), |text, marker| text.replace(marker, ""));
    !DECLARATION.is_match(&stripped)
}

fn is_primitive_or_standard(ty: &str) -> bool {
    if PRIMITIVES.contains(&ty) {
        return true;
    }
    let base = ty.split('<').next().unwrap_or(ty).trim();
    STANDARD_TYPES.contains(&base)
}

fn is_likely_model_class(name: &str) -> bool {
    !CONTAINER_TYPES.contains(&name)
        && !STANDARD_TYPES.contains(&name)
        && name.starts_with(|c: char| c.is_ascii_uppercase())
}

/// Tag every model class referenced by `ty` with the entity suffix
///
/// `List<Order>` becomes `List<OrderEntity>`; standard and container types
/// are left as they are.
pub fn to_persistence_type(ty: &str) -> String {
    if is_primitive_or_standard(ty) {
        return ty.to_string();
    }
    CLASS_NAME
        .replace_all(ty, |caps: &regex::Captures| {
            let class = &caps[0];
            if is_likely_model_class(class) {
                format!("{}{}", class, ENTITY_SUFFIX)
            } else {
                class.to_string()
            }
        })
        .into_owned()
}

/// Inverse of [`to_persistence_type`]: strip the entity suffix from every identifier
pub fn to_model_type(ty: &str) -> String {
    CLASS_NAME
        .replace_all(ty, |caps: &regex::Captures| {
            let class = &caps[0];
            match class.strip_suffix(ENTITY_SUFFIX) {
                Some(model) if !model.is_empty() => model.to_string(),
                _ => class.to_string(),
            }
        })
        .into_owned()
}

/// Classify a persistence field type
pub fn classify(ty: &str) -> Relation {
    if TO_MANY.is_match(ty) {
        Relation::ToMany
    } else if TO_ONE.is_match(ty) && !ty.contains('<') && !ty.contains('>') {
        Relation::ToOne
    } else {
        Relation::Plain
    }
}

/// Identifiers making up a (possibly generic) type
///
/// `Map<String, List<Date>>` yields `Map`, `String`, `List`, `Date`.
pub fn type_names(ty: &str) -> Vec<String> {
    ty.split(|c: char| matches!(c, '<' | '>' | ',' | '[' | ']') || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Every `import x.y.Z;` target in the source, in order
pub fn extract_imports(source: &str) -> Vec<String> {
    IMPORT
        .captures_iter(source)
        .map(|caps| caps[1].trim().to_string())
        .collect()
}

/// Imports from `imports` that the field types actually need
pub fn retain_imports(imports: &[String], fields: &[FieldInfo]) -> Vec<String> {
    let mut retained = BTreeSet::new();
    let candidates: Vec<&String> = imports
        .iter()
        .filter(|import| {
            !DENIED_IMPORT_PREFIXES
                .iter()
                .any(|prefix| import.starts_with(prefix))
        })
        .collect();

    for field in fields {
        for name in type_names(&field.ty) {
            if PRIMITIVES.contains(&name.as_str()) || IMPLICIT_TYPES.contains(&name.as_str()) {
                continue;
            }

            let terminal = format!(".{}", name);
            if let Some(import) = candidates.iter().find(|import| import.ends_with(&terminal)) {
                retained.insert((*import).clone());
                continue;
            }

            let expanded = candidates.iter().find_map(|import| {
                let package = import.strip_suffix(".*")?;
                let (_, members) = WILDCARD_PACKAGES.iter().find(|(p, _)| *p == package)?;
                members
                    .contains(&name.as_str())
                    .then(|| format!("{}.{}", package, name))
            });
            if let Some(import) = expanded {
                retained.insert(import);
            }
        }
    }

    retained.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_package_lookup() {
        assert_eq!(standard_package("TreeMap"), Some("java.util"));
        assert_eq!(standard_package("Instant"), Some("java.time"));
        assert_eq!(standard_package("BigDecimal"), Some("java.math"));
        assert_eq!(standard_package("OrderEntity"), None);
    }

    #[test]
    fn test_extracts_fields_in_order() {
        let src = r#"
public class Order implements IsSerializable {
    private static final long serialVersionUID = 1L;
    private String name;
    private Map<String, Integer> counts;
    private int[] slots;
"#;
        assert_eq!(
            extract_fields(src),
            vec![
                FieldInfo::new("String", "name"),
                FieldInfo::new("Map<String, Integer>", "counts"),
                FieldInfo::new("int[]", "slots"),
            ]
        );
    }

    #[test]
    fn test_identity_field_is_excluded() {
        let src = "private List<String> tags;\n\n    @Id\n    private int id;\n";
        assert_eq!(extract_fields(src), vec![FieldInfo::new("List<String>", "tags")]);
    }

    #[test]
    fn test_annotation_applies_only_to_adjacent_field() {
        let src = "@Id private Long id; @Version private Long ver; private String name;";
        assert_eq!(extract_fields(src), vec![FieldInfo::new("String", "name")]);
    }

    #[test]
    fn test_annotation_window_with_generated_value() {
        let src = r#"
    @Id
    @GeneratedValue(strategy = GenerationType.IDENTITY)
    private Long id;

    @Column
    private String name;

    @OneToMany
    private List<OrderEntity> orders;
"#;
        assert_eq!(
            extract_fields(src),
            vec![
                FieldInfo::new("String", "name"),
                FieldInfo::new("List<OrderEntity>", "orders"),
            ]
        );
    }

    #[test]
    fn test_serial_version_uid_is_skipped() {
        let src = "private long serialVersionUID;\nprivate String title;";
        assert_eq!(extract_fields(src), vec![FieldInfo::new("String", "title")]);
    }

    #[test]
    fn test_to_persistence_type() {
        assert_eq!(to_persistence_type("int"), "int");
        assert_eq!(to_persistence_type("String"), "String");
        assert_eq!(to_persistence_type("LocalDateTime"), "LocalDateTime");
        assert_eq!(to_persistence_type("Order"), "OrderEntity");
        assert_eq!(to_persistence_type("List<Order>"), "List<OrderEntity>");
        assert_eq!(
            to_persistence_type("Map<String, Customer>"),
            "Map<String, CustomerEntity>"
        );
        assert_eq!(to_persistence_type("List<String>"), "List<String>");
    }

    #[test]
    fn test_to_model_type_inverts_persistence_type() {
        for ty in ["Order", "List<Order>", "Map<String, Customer>", "Set<Long>", "int"] {
            assert_eq!(to_model_type(&to_persistence_type(ty)), ty);
        }
        assert_eq!(to_model_type("Entity"), "Entity");
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("List<OrderEntity>"), Relation::ToMany);
        assert_eq!(classify("HashSet<TagEntity>"), Relation::ToMany);
        assert_eq!(classify("CustomerEntity"), Relation::ToOne);
        assert_eq!(classify("Map<String, CustomerEntity>"), Relation::Plain);
        assert_eq!(classify("String"), Relation::Plain);
        assert_eq!(classify("List<String>"), Relation::Plain);
        assert_eq!(Relation::ToOne.annotation(), "@ManyToOne");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(
            type_names("Map<String, List<Date>>"),
            vec!["Map", "String", "List", "Date"]
        );
        assert_eq!(type_names("byte[]"), vec!["byte"]);
    }

    #[test]
    fn test_retain_imports() {
        let src = "import jakarta.persistence.*;\nimport java.math.BigDecimal;\nimport java.util.*;\nimport org.mapstruct.Mapper;\nimport com.acme.Money;\n";
        let imports = extract_imports(src);
        assert_eq!(imports.len(), 5);

        let fields = vec![
            FieldInfo::new("BigDecimal", "total"),
            FieldInfo::new("List<Order>", "orders"),
            FieldInfo::new("String", "name"),
        ];
        assert_eq!(
            retain_imports(&imports, &fields),
            vec!["java.math.BigDecimal".to_string(), "java.util.List".to_string()]
        );
    }
}
