//! Schema definitions and rule checking
//!
//! Schemas are JSON Schema (draft 7) documents, usually stored as YAML.
//! Enforced keywords:
//!
//! - any value: `type`, `enum`, `const`
//! - objects: `required`, `properties`, `patternProperties`,
//!   `additionalProperties`, `propertyNames`, `minProperties`,
//!   `maxProperties`, `dependencies`
//! - arrays: `items` (single schema or tuple form), `additionalItems`,
//!   `contains`, `minItems`, `maxItems`, `uniqueItems`
//! - strings: `minLength`, `maxLength`, `pattern`
//! - numbers: `minimum`, `maximum`, `exclusiveMinimum`, `exclusiveMaximum`,
//!   `multipleOf`
//! - composition: `$ref` (local pointers only), `allOf`, `anyOf`, `oneOf`,
//!   `not`, `if` / `then` / `else`
//!
//! Annotations such as `title`, `description` or `format` are accepted and
//! never checked. Any other keyword is rejected when the schema is loaded.

use crate::error::GeneratorError;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Nesting limit for `$ref` chains and deeply nested documents
const MAX_DEPTH: usize = 64;

/// Keywords that carry no validation rule
const ANNOTATIONS: &[&str] = &[
    "$schema",
    "$id",
    "$comment",
    "title",
    "description",
    "default",
    "examples",
    "readOnly",
    "writeOnly",
    "deprecated",
    "format",
    "contentMediaType",
    "contentEncoding",
];

/// A loaded schema: the raw text (embedded in prompts) and its parsed tree
#[derive(Debug, Clone)]
pub struct SchemaDefinition {
    text: String,
    root: Value,
    patterns: HashMap<String, Regex>,
}

/// One rule a document broke
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// JSON pointer to the offending value (empty for the document root)
    pub path: String,

    /// What went wrong
    pub kind: ViolationKind,
}

/// Kinds of schema violations
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// Value has the wrong type
    Type {
        /// Rendering of the offending value
        value: String,
        /// Expected type(s), e.g. `'string'`
        expected: String,
    },

    /// Required property is missing
    Required(String),

    /// Property not allowed by `additionalProperties: false`
    AdditionalProperty(String),

    /// A `dependencies` entry names a property that is absent
    Dependency {
        /// Property whose presence triggers the dependency
        property: String,
        /// Property that should also be present
        missing: String,
    },

    /// Value is not among the `enum` choices
    NotInEnum(String),

    /// Value differs from `const`
    NotConst(String),

    /// Array shorter than `minItems`
    TooFewItems {
        /// Minimum
        min: u64,
        /// Actual length
        actual: usize,
    },

    /// Array longer than `maxItems`
    TooManyItems {
        /// Maximum
        max: u64,
        /// Actual length
        actual: usize,
    },

    /// Array longer than its tuple `items` with `additionalItems: false`
    AdditionalItems {
        /// Tuple length
        allowed: usize,
        /// Actual length
        actual: usize,
    },

    /// Array repeats an element under `uniqueItems`
    DuplicateItems,

    /// No array element matches `contains`
    NoItemContained,

    /// String shorter than `minLength`
    TooShort {
        /// Minimum
        min: u64,
        /// Actual length in characters
        actual: usize,
    },

    /// String longer than `maxLength`
    TooLong {
        /// Maximum
        max: u64,
        /// Actual length in characters
        actual: usize,
    },

    /// String does not match `pattern`
    Pattern {
        /// Rendering of the offending value
        value: String,
        /// The regular expression
        pattern: String,
    },

    /// Number below `minimum` / `exclusiveMinimum`
    BelowMinimum {
        /// Rendering of the offending value
        value: String,
        /// The bound as written in the schema
        limit: String,
        /// Whether the bound itself is excluded
        exclusive: bool,
    },

    /// Number above `maximum` / `exclusiveMaximum`
    AboveMaximum {
        /// Rendering of the offending value
        value: String,
        /// The bound as written in the schema
        limit: String,
        /// Whether the bound itself is excluded
        exclusive: bool,
    },

    /// Number is not a multiple of `multipleOf`
    NotMultipleOf {
        /// Rendering of the offending value
        value: String,
        /// The divisor as written in the schema
        divisor: String,
    },

    /// Object has fewer than `minProperties` entries
    TooFewProperties {
        /// Minimum
        min: u64,
        /// Actual count
        actual: usize,
    },

    /// Object has more than `maxProperties` entries
    TooManyProperties {
        /// Maximum
        max: u64,
        /// Actual count
        actual: usize,
    },

    /// No `anyOf` / `oneOf` alternative matched
    NoAlternativeMatched,

    /// More than one `oneOf` alternative matched
    MultipleAlternativesMatched(usize),

    /// Value matches the schema under `not`
    Negated(String),

    /// The schema forbids any value here (`false` schema)
    Forbidden,

    /// Nesting exceeded the supported depth
    TooDeep,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Type { value, expected } => write!(f, "{} is not of type {}", value, expected),
            ViolationKind::Required(name) => write!(f, "'{}' is a required property", name),
            ViolationKind::AdditionalProperty(name) => {
                write!(f, "additional property '{}' is not allowed", name)
            }
            ViolationKind::Dependency { property, missing } => {
                write!(f, "'{}' is required when '{}' is present", missing, property)
            }
            ViolationKind::NotInEnum(value) => write!(f, "{} is not one of the allowed values", value),
            ViolationKind::NotConst(value) => write!(f, "{} does not equal the expected constant", value),
            ViolationKind::TooFewItems { min, actual } => {
                write!(f, "{} item(s) given, at least {} required", actual, min)
            }
            ViolationKind::TooManyItems { max, actual } => {
                write!(f, "{} item(s) given, at most {} allowed", actual, max)
            }
            ViolationKind::AdditionalItems { allowed, actual } => {
                write!(f, "{} item(s) given, only {} allowed by the tuple", actual, allowed)
            }
            ViolationKind::DuplicateItems => write!(f, "array items are not unique"),
            ViolationKind::NoItemContained => write!(f, "no item matches the `contains` schema"),
            ViolationKind::TooShort { min, actual } => {
                write!(f, "string of length {} is shorter than {}", actual, min)
            }
            ViolationKind::TooLong { max, actual } => {
                write!(f, "string of length {} is longer than {}", actual, max)
            }
            ViolationKind::Pattern { value, pattern } => write!(f, "{} does not match '{}'", value, pattern),
            ViolationKind::BelowMinimum { value, limit, exclusive } => {
                let or_equal = if *exclusive { "or equal to " } else { "" };
                write!(f, "{} is less than {}the minimum of {}", value, or_equal, limit)
            }
            ViolationKind::AboveMaximum { value, limit, exclusive } => {
                let or_equal = if *exclusive { "or equal to " } else { "" };
                write!(f, "{} is greater than {}the maximum of {}", value, or_equal, limit)
            }
            ViolationKind::NotMultipleOf { value, divisor } => {
                write!(f, "{} is not a multiple of {}", value, divisor)
            }
            ViolationKind::TooFewProperties { min, actual } => {
                write!(f, "{} propert(ies) given, at least {} required", actual, min)
            }
            ViolationKind::TooManyProperties { max, actual } => {
                write!(f, "{} propert(ies) given, at most {} allowed", actual, max)
            }
            ViolationKind::NoAlternativeMatched => write!(f, "value does not match any allowed alternative"),
            ViolationKind::MultipleAlternativesMatched(n) => {
                write!(f, "value matches {} alternatives but exactly one is allowed", n)
            }
            ViolationKind::Negated(value) => write!(f, "{} must not match the `not` schema", value),
            ViolationKind::Forbidden => write!(f, "no value is allowed here"),
            ViolationKind::TooDeep => write!(f, "document nesting exceeds {} levels", MAX_DEPTH),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "at document root: {}", self.kind)
        } else {
            write!(f, "at `{}`: {}", self.path, self.kind)
        }
    }
}

impl SchemaDefinition {
    /// Load a schema from a file
    ///
    /// # Errors
    /// [`GeneratorError::MissingSchema`] if the file does not exist,
    /// [`GeneratorError::InvalidSchema`] if it cannot be used.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GeneratorError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(GeneratorError::MissingSchema(path.to_path_buf()));
        }
        let text = fs::read_to_string(path)?;
        Self::parse(text)
    }

    /// Parse a schema from YAML (or JSON) text
    ///
    /// Fails on keywords outside the supported vocabulary, on patterns that
    /// are not valid regular expressions and on unresolvable `$ref`s.
    pub fn parse(text: impl Into<String>) -> Result<Self, GeneratorError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(GeneratorError::InvalidSchema("schema document is empty".to_string()));
        }

        let root: Value = serde_yaml::from_str(&text)?;
        if !root.is_object() {
            return Err(GeneratorError::InvalidSchema(
                "schema must be a mapping at the top level".to_string(),
            ));
        }

        let mut patterns = HashMap::new();
        audit(&root, "", &mut patterns)?;

        let mut references = Vec::new();
        collect_refs(&root, &mut references);
        if let Some(unresolved) = references.iter().find(|r| resolve(&root, r).is_none()) {
            return Err(GeneratorError::InvalidSchema(format!(
                "unresolvable $ref '{}' (only local '#/...' references are supported)",
                unresolved
            )));
        }

        Ok(Self { text, root, patterns })
    }

    /// The schema exactly as written
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Top-level `required` property names, in declaration order
    pub fn required_fields(&self) -> Vec<&str> {
        self.root
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Check a parsed document, returning every violation found
    pub fn check(&self, instance: &Value) -> Vec<Violation> {
        let checker = Checker {
            root: &self.root,
            patterns: &self.patterns,
        };
        let mut violations = Vec::new();
        checker.node(&self.root, instance, "", 0, &mut violations);
        violations
    }
}

fn invalid(path: &str, message: impl fmt::Display) -> GeneratorError {
    let location = if path.is_empty() {
        "the schema root".to_string()
    } else {
        format!("`{}`", path)
    };
    GeneratorError::InvalidSchema(format!("{} at {}", message, location))
}

/// Walk every subschema, rejecting unsupported keywords and compiling patterns
fn audit(schema: &Value, path: &str, patterns: &mut HashMap<String, Regex>) -> Result<(), GeneratorError> {
    let map = match schema {
        Value::Bool(_) => return Ok(()),
        Value::Object(map) => map,
        _ => return Err(invalid(path, "expected a schema (mapping or boolean)")),
    };

    for (keyword, value) in map {
        let here = child_path(path, keyword);
        match keyword.as_str() {
            "properties" | "definitions" | "$defs" => {
                for (name, subschema) in subschemas_by_name(value, &here)? {
                    audit(subschema, &child_path(&here, name), patterns)?;
                }
            }
            "patternProperties" => {
                for (pattern, subschema) in subschemas_by_name(value, &here)? {
                    compile(pattern, &here, patterns)?;
                    audit(subschema, &child_path(&here, pattern), patterns)?;
                }
            }
            "dependencies" => {
                for (name, dependency) in subschemas_by_name(value, &here)? {
                    if !dependency.is_array() {
                        audit(dependency, &child_path(&here, name), patterns)?;
                    }
                }
            }
            "items" if value.is_array() => audit_each(value, &here, patterns)?,
            "allOf" | "anyOf" | "oneOf" => audit_each(value, &here, patterns)?,
            "items" | "additionalItems" | "additionalProperties" | "contains" | "propertyNames" | "not"
            | "if" | "then" | "else" => audit(value, &here, patterns)?,
            "pattern" => match value {
                Value::String(pattern) => compile(pattern, &here, patterns)?,
                _ => return Err(invalid(&here, "pattern must be a string")),
            },
            "minimum" | "maximum" | "exclusiveMinimum" | "exclusiveMaximum" | "multipleOf" => {
                if !value.is_number() {
                    return Err(invalid(&here, format!("'{}' must be a number", keyword)));
                }
            }
            "type" | "enum" | "const" | "required" | "$ref" | "minProperties" | "maxProperties"
            | "minItems" | "maxItems" | "uniqueItems" | "minLength" | "maxLength" => {}
            other if ANNOTATIONS.contains(&other) => {}
            other => return Err(invalid(path, format!("unsupported schema keyword '{}'", other))),
        }
    }
    Ok(())
}

fn subschemas_by_name<'v>(value: &'v Value, path: &str) -> Result<&'v Map<String, Value>, GeneratorError> {
    value
        .as_object()
        .ok_or_else(|| invalid(path, "expected a mapping of schemas"))
}

fn audit_each(value: &Value, path: &str, patterns: &mut HashMap<String, Regex>) -> Result<(), GeneratorError> {
    let subschemas = value
        .as_array()
        .ok_or_else(|| invalid(path, "expected a list of schemas"))?;
    for (idx, subschema) in subschemas.iter().enumerate() {
        audit(subschema, &child_path(path, &idx.to_string()), patterns)?;
    }
    Ok(())
}

fn compile(pattern: &str, path: &str, patterns: &mut HashMap<String, Regex>) -> Result<(), GeneratorError> {
    if !patterns.contains_key(pattern) {
        let regex = Regex::new(pattern)
            .map_err(|e| invalid(path, format!("invalid pattern '{}': {}", pattern, e)))?;
        patterns.insert(pattern.to_string(), regex);
    }
    Ok(())
}

fn collect_refs<'v>(value: &'v Value, out: &mut Vec<&'v str>) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get("$ref") {
                out.push(reference.as_str());
            }
            for child in map.values() {
                collect_refs(child, out);
            }
        }
        Value::Array(items) => {
            for child in items {
                collect_refs(child, out);
            }
        }
        _ => {}
    }
}

fn resolve<'v>(root: &'v Value, reference: &str) -> Option<&'v Value> {
    reference.strip_prefix('#').and_then(|pointer| root.pointer(pointer))
}

fn child_path(path: &str, segment: &str) -> String {
    format!("{}/{}", path, segment.replace('~', "~0").replace('/', "~1"))
}

/// Walks a document against an audited schema tree
struct Checker<'s> {
    root: &'s Value,
    patterns: &'s HashMap<String, Regex>,
}

impl Checker<'_> {
    fn node(&self, schema: &Value, instance: &Value, path: &str, depth: usize, out: &mut Vec<Violation>) {
        let mut push = |kind| {
            out.push(Violation {
                path: path.to_string(),
                kind,
            })
        };

        if depth > MAX_DEPTH {
            push(ViolationKind::TooDeep);
            return;
        }

        let schema = match schema {
            Value::Bool(true) => return,
            Value::Bool(false) => {
                push(ViolationKind::Forbidden);
                return;
            }
            Value::Object(map) => map,
            _ => return,
        };

        if let Some(expected) = schema.get("type") {
            if !type_matches(expected, instance) {
                push(ViolationKind::Type {
                    value: render(instance),
                    expected: render_types(expected),
                });
                // Nested rules would only add noise once the type is wrong
                return;
            }
        }

        if let Some(Value::Array(choices)) = schema.get("enum") {
            if !choices.contains(instance) {
                push(ViolationKind::NotInEnum(render(instance)));
            }
        }

        if let Some(constant) = schema.get("const") {
            if constant != instance {
                push(ViolationKind::NotConst(render(instance)));
            }
        }

        if let Some(Value::String(reference)) = schema.get("$ref") {
            if let Some(target) = resolve(self.root, reference) {
                self.node(target, instance, path, depth + 1, out);
            }
        }

        match instance {
            Value::Object(map) => self.object(schema, instance, map, path, depth, out),
            Value::Array(items) => self.array(schema, items, path, depth, out),
            Value::String(s) => self.string(schema, s, path, out),
            Value::Number(n) => {
                if let Some(n) = n.as_f64() {
                    check_number(schema, n, instance, path, out);
                }
            }
            _ => {}
        }

        self.composition(schema, instance, path, depth, out);
    }

    /// Whether `instance` satisfies `schema`, discarding the details
    fn passes(&self, schema: &Value, instance: &Value, path: &str, depth: usize) -> bool {
        let mut scratch = Vec::new();
        self.node(schema, instance, path, depth + 1, &mut scratch);
        scratch.is_empty()
    }

    fn object(
        &self,
        schema: &Map<String, Value>,
        instance: &Value,
        map: &Map<String, Value>,
        path: &str,
        depth: usize,
        out: &mut Vec<Violation>,
    ) {
        let mut push = |kind| {
            out.push(Violation {
                path: path.to_string(),
                kind,
            })
        };

        if let Some(Value::Array(required)) = schema.get("required") {
            for name in required.iter().filter_map(Value::as_str) {
                if !map.contains_key(name) {
                    push(ViolationKind::Required(name.to_string()));
                }
            }
        }

        if let Some(min) = schema.get("minProperties").and_then(Value::as_u64) {
            if (map.len() as u64) < min {
                push(ViolationKind::TooFewProperties {
                    min,
                    actual: map.len(),
                });
            }
        }

        if let Some(max) = schema.get("maxProperties").and_then(Value::as_u64) {
            if (map.len() as u64) > max {
                push(ViolationKind::TooManyProperties {
                    max,
                    actual: map.len(),
                });
            }
        }

        if let Some(Value::Object(dependencies)) = schema.get("dependencies") {
            for (property, dependency) in dependencies.iter().filter(|(p, _)| map.contains_key(*p)) {
                match dependency {
                    Value::Array(names) => {
                        for missing in names.iter().filter_map(Value::as_str) {
                            if !map.contains_key(missing) {
                                out.push(Violation {
                                    path: path.to_string(),
                                    kind: ViolationKind::Dependency {
                                        property: property.clone(),
                                        missing: missing.to_string(),
                                    },
                                });
                            }
                        }
                    }
                    subschema => self.node(subschema, instance, path, depth + 1, out),
                }
            }
        }

        let properties = schema.get("properties").and_then(Value::as_object);
        if let Some(properties) = properties {
            for (name, subschema) in properties {
                if let Some(value) = map.get(name) {
                    self.node(subschema, value, &child_path(path, name), depth + 1, out);
                }
            }
        }

        let pattern_properties: Vec<(&Regex, &Value)> = schema
            .get("patternProperties")
            .and_then(Value::as_object)
            .map(|by_pattern| {
                by_pattern
                    .iter()
                    .filter_map(|(pattern, subschema)| self.patterns.get(pattern).map(|regex| (regex, subschema)))
                    .collect()
            })
            .unwrap_or_default();
        for (name, value) in map {
            for (regex, subschema) in &pattern_properties {
                if regex.is_match(name) {
                    self.node(subschema, value, &child_path(path, name), depth + 1, out);
                }
            }
        }

        if let Some(names) = schema.get("propertyNames") {
            for name in map.keys() {
                self.node(names, &Value::String(name.clone()), &child_path(path, name), depth + 1, out);
            }
        }

        if let Some(additional) = schema.get("additionalProperties") {
            let extras = map.iter().filter(|(name, _)| {
                !properties.map(|p| p.contains_key(*name)).unwrap_or(false)
                    && !pattern_properties.iter().any(|(regex, _)| regex.is_match(name))
            });
            for (name, value) in extras {
                match additional {
                    Value::Bool(false) => out.push(Violation {
                        path: path.to_string(),
                        kind: ViolationKind::AdditionalProperty(name.clone()),
                    }),
                    Value::Object(_) => self.node(additional, value, &child_path(path, name), depth + 1, out),
                    _ => {}
                }
            }
        }
    }

    fn array(&self, schema: &Map<String, Value>, items: &[Value], path: &str, depth: usize, out: &mut Vec<Violation>) {
        let mut push = |kind| {
            out.push(Violation {
                path: path.to_string(),
                kind,
            })
        };

        if let Some(min) = schema.get("minItems").and_then(Value::as_u64) {
            if (items.len() as u64) < min {
                push(ViolationKind::TooFewItems {
                    min,
                    actual: items.len(),
                });
            }
        }

        if let Some(max) = schema.get("maxItems").and_then(Value::as_u64) {
            if (items.len() as u64) > max {
                push(ViolationKind::TooManyItems {
                    max,
                    actual: items.len(),
                });
            }
        }

        if schema.get("uniqueItems") == Some(&Value::Bool(true)) {
            let duplicated = items
                .iter()
                .enumerate()
                .any(|(idx, item)| items[idx + 1..].contains(item));
            if duplicated {
                push(ViolationKind::DuplicateItems);
            }
        }

        if let Some(contains) = schema.get("contains") {
            if !items.iter().any(|item| self.passes(contains, item, path, depth)) {
                push(ViolationKind::NoItemContained);
            }
        }

        match schema.get("items") {
            Some(Value::Array(tuple)) => {
                for (idx, (subschema, value)) in tuple.iter().zip(items).enumerate() {
                    self.node(subschema, value, &child_path(path, &idx.to_string()), depth + 1, out);
                }
                if items.len() > tuple.len() {
                    match schema.get("additionalItems") {
                        Some(Value::Bool(false)) => out.push(Violation {
                            path: path.to_string(),
                            kind: ViolationKind::AdditionalItems {
                                allowed: tuple.len(),
                                actual: items.len(),
                            },
                        }),
                        Some(extra) => {
                            for (idx, value) in items.iter().enumerate().skip(tuple.len()) {
                                self.node(extra, value, &child_path(path, &idx.to_string()), depth + 1, out);
                            }
                        }
                        None => {}
                    }
                }
            }
            Some(subschema) => {
                for (idx, value) in items.iter().enumerate() {
                    self.node(subschema, value, &child_path(path, &idx.to_string()), depth + 1, out);
                }
            }
            None => {}
        }
    }

    fn string(&self, schema: &Map<String, Value>, s: &str, path: &str, out: &mut Vec<Violation>) {
        let mut push = |kind| {
            out.push(Violation {
                path: path.to_string(),
                kind,
            })
        };
        let len = s.chars().count();

        if let Some(min) = schema.get("minLength").and_then(Value::as_u64) {
            if (len as u64) < min {
                push(ViolationKind::TooShort { min, actual: len });
            }
        }

        if let Some(max) = schema.get("maxLength").and_then(Value::as_u64) {
            if (len as u64) > max {
                push(ViolationKind::TooLong { max, actual: len });
            }
        }

        if let Some(Value::String(pattern)) = schema.get("pattern") {
            if let Some(regex) = self.patterns.get(pattern) {
                if !regex.is_match(s) {
                    push(ViolationKind::Pattern {
                        value: render(&Value::String(s.to_string())),
                        pattern: pattern.clone(),
                    });
                }
            }
        }
    }

    fn composition(
        &self,
        schema: &Map<String, Value>,
        instance: &Value,
        path: &str,
        depth: usize,
        out: &mut Vec<Violation>,
    ) {
        if let Some(Value::Array(all)) = schema.get("allOf") {
            for subschema in all {
                self.node(subschema, instance, path, depth + 1, out);
            }
        }

        let matches = |alternatives: &[Value]| {
            alternatives
                .iter()
                .filter(|subschema| self.passes(subschema, instance, path, depth))
                .count()
        };

        if let Some(Value::Array(any)) = schema.get("anyOf") {
            if matches(any.as_slice()) == 0 {
                out.push(Violation {
                    path: path.to_string(),
                    kind: ViolationKind::NoAlternativeMatched,
                });
            }
        }

        if let Some(Value::Array(one)) = schema.get("oneOf") {
            match matches(one.as_slice()) {
                1 => {}
                0 => out.push(Violation {
                    path: path.to_string(),
                    kind: ViolationKind::NoAlternativeMatched,
                }),
                n => out.push(Violation {
                    path: path.to_string(),
                    kind: ViolationKind::MultipleAlternativesMatched(n),
                }),
            }
        }

        if let Some(negated) = schema.get("not") {
            if self.passes(negated, instance, path, depth) {
                out.push(Violation {
                    path: path.to_string(),
                    kind: ViolationKind::Negated(render(instance)),
                });
            }
        }

        if let Some(condition) = schema.get("if") {
            let branch = if self.passes(condition, instance, path, depth) {
                schema.get("then")
            } else {
                schema.get("else")
            };
            if let Some(branch) = branch {
                self.node(branch, instance, path, depth + 1, out);
            }
        }
    }
}

fn check_number(schema: &Map<String, Value>, n: f64, instance: &Value, path: &str, out: &mut Vec<Violation>) {
    let mut push = |kind| {
        out.push(Violation {
            path: path.to_string(),
            kind,
        })
    };
    let bound = |keyword: &str| {
        schema
            .get(keyword)
            .and_then(|limit| limit.as_f64().map(|f| (f, limit.to_string())))
    };

    if let Some((min, limit)) = bound("minimum") {
        if n < min {
            push(ViolationKind::BelowMinimum {
                value: render(instance),
                limit,
                exclusive: false,
            });
        }
    }

    if let Some((min, limit)) = bound("exclusiveMinimum") {
        if n <= min {
            push(ViolationKind::BelowMinimum {
                value: render(instance),
                limit,
                exclusive: true,
            });
        }
    }

    if let Some((max, limit)) = bound("maximum") {
        if n > max {
            push(ViolationKind::AboveMaximum {
                value: render(instance),
                limit,
                exclusive: false,
            });
        }
    }

    if let Some((max, limit)) = bound("exclusiveMaximum") {
        if n >= max {
            push(ViolationKind::AboveMaximum {
                value: render(instance),
                limit,
                exclusive: true,
            });
        }
    }

    if let Some((divisor, shown)) = bound("multipleOf") {
        let quotient = n / divisor;
        if divisor > 0.0 && (quotient - quotient.round()).abs() > 1e-9 {
            push(ViolationKind::NotMultipleOf {
                value: render(instance),
                divisor: shown,
            });
        }
    }
}

fn type_matches(expected: &Value, instance: &Value) -> bool {
    match expected {
        Value::String(name) => matches_type(name, instance),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .any(|name| matches_type(name, instance)),
        _ => true,
    }
}

fn matches_type(name: &str, instance: &Value) -> bool {
    match name {
        "object" => instance.is_object(),
        "array" => instance.is_array(),
        "string" => instance.is_string(),
        "boolean" => instance.is_boolean(),
        "null" => instance.is_null(),
        "number" => instance.is_number(),
        "integer" => {
            instance.is_i64()
                || instance.is_u64()
                || instance.as_f64().map(|f| f.fract() == 0.0).unwrap_or(false)
        }
        _ => true,
    }
}

fn render_types(expected: &Value) -> String {
    match expected {
        Value::String(name) => format!("'{}'", name),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .map(|name| format!("'{}'", name))
            .collect::<Vec<_>>()
            .join(" or "),
        other => other.to_string(),
    }
}

/// Short rendering of a value for error messages
fn render(value: &Value) -> String {
    const LIMIT: usize = 60;
    let text = match value {
        Value::String(s) => format!("'{}'", s),
        Value::Object(_) => "an object".to_string(),
        Value::Array(_) => "an array".to_string(),
        other => other.to_string(),
    };
    if text.chars().count() > LIMIT {
        let truncated: String = text.chars().take(LIMIT).collect();
        format!("{}...", truncated)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCHEMA: &str = r##"
type: object
required: [infinitivo, gerundio, presente]
additionalProperties: false
properties:
  infinitivo:
    type: string
    minLength: 2
  gerundio:
    type: string
  presente:
    $ref: "#/definitions/conjugation"
  imperfecto-subjuntivo:
    $ref: "#/definitions/alternatives"
definitions:
  conjugation:
    type: object
    required: [yo, tu]
    properties:
      yo: { type: string }
      tu: { type: string }
  alternatives:
    type: object
    required: [yo]
    properties:
      yo:
        type: array
        items: { type: string }
        minItems: 1
"##;

    fn schema() -> SchemaDefinition {
        SchemaDefinition::parse(SCHEMA).unwrap()
    }

    fn valid_doc() -> Value {
        json!({
            "infinitivo": "hablar",
            "gerundio": "hablando",
            "presente": { "yo": "hablo", "tu": "hablas" },
        })
    }

    #[test]
    fn test_valid_document_has_no_violations() {
        assert!(schema().check(&valid_doc()).is_empty());
    }

    #[test]
    fn test_missing_required_property() {
        let mut doc = valid_doc();
        doc.as_object_mut().unwrap().remove("infinitivo");

        let violations = schema().check(&doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::Required("infinitivo".to_string()));
        assert_eq!(
            violations[0].to_string(),
            "at document root: 'infinitivo' is a required property"
        );
    }

    #[test]
    fn test_nested_required_via_ref() {
        let mut doc = valid_doc();
        doc["presente"].as_object_mut().unwrap().remove("tu");

        let violations = schema().check(&doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "/presente");
        assert_eq!(violations[0].to_string(), "at `/presente`: 'tu' is a required property");
    }

    #[test]
    fn test_wrong_type() {
        let mut doc = valid_doc();
        doc["gerundio"] = json!(42);

        let violations = schema().check(&doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].to_string(), "at `/gerundio`: 42 is not of type 'string'");
    }

    #[test]
    fn test_root_type_mismatch() {
        let violations = schema().check(&json!("Sure! Here is the conjugation"));
        assert_eq!(violations.len(), 1);
        assert!(matches!(violations[0].kind, ViolationKind::Type { .. }));
    }

    #[test]
    fn test_additional_property_rejected() {
        let mut doc = valid_doc();
        doc["notes"] = json!("extra");

        let violations = schema().check(&doc);
        assert_eq!(violations[0].kind, ViolationKind::AdditionalProperty("notes".to_string()));
    }

    #[test]
    fn test_array_items_and_min_items() {
        let mut doc = valid_doc();
        doc["imperfecto-subjuntivo"] = json!({ "yo": [] });
        let violations = schema().check(&doc);
        assert_eq!(
            violations[0].kind,
            ViolationKind::TooFewItems { min: 1, actual: 0 }
        );

        doc["imperfecto-subjuntivo"] = json!({ "yo": ["hablara", 7] });
        let violations = schema().check(&doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "/imperfecto-subjuntivo/yo/1");
    }

    #[test]
    fn test_min_length() {
        let mut doc = valid_doc();
        doc["infinitivo"] = json!("h");
        let violations = schema().check(&doc);
        assert_eq!(violations[0].kind, ViolationKind::TooShort { min: 2, actual: 1 });
    }

    #[test]
    fn test_collects_all_violations() {
        let violations = schema().check(&json!({}));
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(schema().required_fields(), vec!["infinitivo", "gerundio", "presente"]);
    }

    #[test]
    fn test_enum_const_and_type_lists() {
        let schema = SchemaDefinition::parse(
            r#"
type: object
properties:
  modo: { enum: [indicativo, subjuntivo] }
  version: { const: 1 }
  nota: { type: [string, "null"] }
"#,
        )
        .unwrap();

        assert!(schema
            .check(&json!({ "modo": "indicativo", "version": 1, "nota": null }))
            .is_empty());

        let violations = schema.check(&json!({ "modo": "imperativo", "version": 2, "nota": 3 }));
        assert_eq!(violations.len(), 3);
        let nota = violations.iter().find(|v| v.path == "/nota").unwrap();
        assert_eq!(nota.to_string(), "at `/nota`: 3 is not of type 'string' or 'null'");
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationKind::NotInEnum("'imperativo'".to_string())));
    }

    #[test]
    fn test_one_of_and_any_of() {
        let schema = SchemaDefinition::parse(
            r#"
properties:
  forma:
    oneOf:
      - { type: string }
      - { type: array, items: { type: string } }
  otra:
    anyOf:
      - { type: integer }
      - { type: boolean }
"#,
        )
        .unwrap();

        assert!(schema.check(&json!({ "forma": "hablara", "otra": true })).is_empty());
        assert!(schema.check(&json!({ "forma": ["hablara", "hablase"] })).is_empty());

        let violations = schema.check(&json!({ "forma": 1, "otra": "x" }));
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.kind == ViolationKind::NoAlternativeMatched));
    }

    #[test]
    fn test_integer_accepts_whole_floats() {
        let schema = SchemaDefinition::parse("type: integer").unwrap();
        assert!(schema.check(&json!(3)).is_empty());
        assert!(schema.check(&json!(3.0)).is_empty());
        assert_eq!(schema.check(&json!(3.5)).len(), 1);
    }

    #[test]
    fn test_recursive_ref_is_bounded() {
        let schema = SchemaDefinition::parse("$ref: \"#\"").unwrap();
        let violations = schema.check(&json!({}));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::TooDeep);
    }

    #[test]
    fn test_pointer_escaping() {
        assert_eq!(child_path("", "a/b"), "/a~1b");
        assert_eq!(child_path("/x", "t~n"), "/x/t~0n");
    }

    #[test]
    fn test_invalid_schemas() {
        assert!(matches!(
            SchemaDefinition::parse(""),
            Err(GeneratorError::InvalidSchema(_))
        ));
        assert!(matches!(
            SchemaDefinition::parse("- just\n- a list\n"),
            Err(GeneratorError::InvalidSchema(_))
        ));
        assert!(matches!(
            SchemaDefinition::parse("type: object\nproperties: {a: {$ref: '#/definitions/missing'}}"),
            Err(GeneratorError::InvalidSchema(_))
        ));
        assert!(matches!(
            SchemaDefinition::parse("type: [object\n"),
            Err(GeneratorError::InvalidSchema(_))
        ));
    }

    #[test]
    fn test_pattern_and_not() {
        let schema = SchemaDefinition::parse(
            r#"
type: object
required: [infinitivo]
properties:
  infinitivo: { type: string, pattern: '^[a-z]+(ar|er|ir)$' }
  meaning: { not: { type: string } }
"#,
        )
        .unwrap();

        assert!(schema.check(&json!({ "infinitivo": "hablar" })).is_empty());

        let violations = schema.check(&json!({ "infinitivo": "HABLAR123", "meaning": "to speak" }));
        assert_eq!(violations.len(), 2);
        let infinitivo = violations.iter().find(|v| v.path == "/infinitivo").unwrap();
        assert_eq!(
            infinitivo.to_string(),
            "at `/infinitivo`: 'HABLAR123' does not match '^[a-z]+(ar|er|ir)$'"
        );
        let meaning = violations.iter().find(|v| v.path == "/meaning").unwrap();
        assert_eq!(meaning.kind, ViolationKind::Negated("'to speak'".to_string()));
    }

    #[test]
    fn test_numeric_bounds() {
        let schema = SchemaDefinition::parse(
            r#"
properties:
  edad: { type: integer, minimum: 0, exclusiveMaximum: 150 }
  paso: { multipleOf: 0.5 }
"#,
        )
        .unwrap();

        assert!(schema.check(&json!({ "edad": 149, "paso": 1.5 })).is_empty());

        let violations = schema.check(&json!({ "edad": -1 }));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].to_string(), "at `/edad`: -1 is less than the minimum of 0");

        let violations = schema.check(&json!({ "edad": 150, "paso": 0.3 }));
        assert_eq!(violations.len(), 2);
        let edad = violations.iter().find(|v| v.path == "/edad").unwrap();
        assert_eq!(
            edad.to_string(),
            "at `/edad`: 150 is greater than or equal to the maximum of 150"
        );
        assert!(violations
            .iter()
            .any(|v| v.path == "/paso" && matches!(v.kind, ViolationKind::NotMultipleOf { .. })));
    }

    #[test]
    fn test_pattern_properties_and_property_names() {
        let schema = SchemaDefinition::parse(
            r#"
type: object
properties:
  infinitivo: { type: string }
patternProperties:
  '^x-': { type: string }
propertyNames: { maxLength: 12 }
additionalProperties: false
maxProperties: 3
"#,
        )
        .unwrap();

        assert!(schema.check(&json!({ "infinitivo": "ir", "x-nota": "irregular" })).is_empty());

        let violations = schema.check(&json!({ "infinitivo": "ir", "x-nota": 1, "gerundio": "yendo" }));
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().any(|v| v.path == "/x-nota"));
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationKind::AdditionalProperty("gerundio".to_string())));

        let violations = schema.check(&json!({ "x-una-nota-larga": "a" }));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "/x-una-nota-larga");
        assert!(matches!(violations[0].kind, ViolationKind::TooLong { max: 12, .. }));

        let violations = schema.check(&json!({ "x-a": "a", "x-b": "b", "x-c": "c", "x-d": "d" }));
        assert_eq!(
            violations,
            vec![Violation {
                path: String::new(),
                kind: ViolationKind::TooManyProperties { max: 3, actual: 4 },
            }]
        );
    }

    #[test]
    fn test_unique_items_contains_and_tuples() {
        let schema = SchemaDefinition::parse(
            r#"
properties:
  formas: { type: array, uniqueItems: true, contains: { const: hablara } }
  par: { type: array, items: [{ type: string }, { type: integer }], additionalItems: false }
"#,
        )
        .unwrap();

        assert!(schema
            .check(&json!({ "formas": ["hablara", "hablase"], "par": ["a", 1] }))
            .is_empty());

        let violations = schema.check(&json!({ "formas": ["hablase", "hablase"], "par": ["a", 1, 2] }));
        assert_eq!(violations.len(), 3);
        assert!(violations
            .iter()
            .any(|v| v.path == "/formas" && v.kind == ViolationKind::DuplicateItems));
        assert!(violations
            .iter()
            .any(|v| v.path == "/formas" && v.kind == ViolationKind::NoItemContained));
        assert!(violations.iter().any(|v| v.path == "/par"
            && v.kind == ViolationKind::AdditionalItems { allowed: 2, actual: 3 }));
    }

    #[test]
    fn test_conditionals_and_dependencies() {
        let schema = SchemaDefinition::parse(
            r#"
type: object
properties:
  reflexivo: { type: boolean }
if:
  required: [reflexivo]
  properties: { reflexivo: { const: true } }
then:
  required: [pronombre]
else:
  not: { required: [pronombre] }
dependencies:
  participio-pasado: [gerundio]
"#,
        )
        .unwrap();

        assert!(schema.check(&json!({ "reflexivo": true, "pronombre": "se" })).is_empty());

        let violations = schema.check(&json!({ "reflexivo": true }));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::Required("pronombre".to_string()));

        let violations = schema.check(&json!({ "reflexivo": false, "pronombre": "se" }));
        assert_eq!(violations.len(), 1);
        assert!(matches!(violations[0].kind, ViolationKind::Negated(_)));

        let violations = schema.check(&json!({ "participio-pasado": "hablado" }));
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].to_string(),
            "at document root: 'gerundio' is required when 'participio-pasado' is present"
        );
    }

    #[test]
    fn test_unsupported_keywords_are_rejected() {
        let result = SchemaDefinition::parse(
            "type: object\nproperties:\n  infinitivo: { type: string, unevaluatedProperties: false }\n",
        );
        match result {
            Err(GeneratorError::InvalidSchema(message)) => {
                assert!(message.contains("unsupported schema keyword 'unevaluatedProperties'"));
                assert!(message.contains("/properties/infinitivo"));
            }
            other => panic!("expected InvalidSchema, got {:?}", other),
        }

        assert!(matches!(
            SchemaDefinition::parse("type: string\npattern: '(['\n"),
            Err(GeneratorError::InvalidSchema(_))
        ));
        assert!(matches!(
            SchemaDefinition::parse("type: integer\nminimum: cero\n"),
            Err(GeneratorError::InvalidSchema(_))
        ));
        assert!(matches!(
            SchemaDefinition::parse("allOf: { type: string }\n"),
            Err(GeneratorError::InvalidSchema(_))
        ));
    }

    #[test]
    fn test_annotations_and_keyword_named_properties_are_accepted() {
        let schema = SchemaDefinition::parse(
            r#"
$schema: http://json-schema.org/draft-07/schema
title: Verb
description: A conjugated verb
type: object
properties:
  type: { type: string, description: regular or irregular }
  pattern: { type: string, format: regex, examples: [ar] }
"#,
        )
        .unwrap();

        assert!(schema.check(&json!({ "type": "regular", "pattern": "ar" })).is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let result = SchemaDefinition::load("/nonexistent/verb-schema.yml");
        assert!(matches!(result, Err(GeneratorError::MissingSchema(_))));
    }

    #[test]
    fn test_render_truncates() {
        let long = Value::String("x".repeat(200));
        assert!(render(&long).ends_with("..."));
        assert!(render(&long).chars().count() <= 63);
    }
}
