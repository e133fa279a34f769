//! Type Catalog
//!
//! Read-only registry of controls, events, properties and two-way pairs. Built once from the
//! encoded schema lines in [`super::terminal_gui_schema`] and shared by reference.

use super::terminal_gui_schema::{CONTROL_SCHEMA, PROPERTY_SCHEMA};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub const COMMON_SCOPE: &str = "Common";

/// Argument type used when an event delegate carries no payload.
pub const DEFAULT_EVENT_ARGS: &str = "System.EventArgs";

static EVENT_HANDLER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^System\.EventHandler<(.+)>$").expect("valid event handler pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlDescriptor {
    pub output_type: String,
    pub is_container: bool,
    pub is_generic: bool,
    pub has_button_slot: bool,
    pub is_action_button: bool,
}

impl ControlDescriptor {
    /// The output type, closed over `generic` when the control accepts one.
    pub fn output_type_with(&self, generic: Option<&str>) -> String {
        match generic.map(str::trim) {
            Some(arg) if self.is_generic && !arg.is_empty() => {
                format!("{}<{}>", self.output_type, arg)
            }
            _ => self.output_type.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDescriptor {
    pub delegate_type: String,
    pub argument_type: String,
    pub obsolete: bool,
    pub replacement: Option<String>,
}

impl EventDescriptor {
    pub fn new(delegate_type: &str, obsolete: bool, replacement: Option<String>) -> Self {
        EventDescriptor {
            delegate_type: delegate_type.to_string(),
            argument_type: argument_type_of(delegate_type),
            obsolete,
            replacement,
        }
    }
}

/// Extract `T` from `System.EventHandler<T>`; anything else gets the untyped argument.
pub fn argument_type_of(delegate_type: &str) -> String {
    EVENT_HANDLER_RE
        .captures(delegate_type)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_EVENT_ARGS.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name")]
pub enum SemanticType {
    Bool,
    Int,
    Float,
    String,
    Array,
    /// Pos/Dim layout values, emitted verbatim.
    Layout,
    /// An invocable action with a can-execute predicate.
    Command,
    QualifiedType(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDescriptor {
    pub semantic_type: SemanticType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwoWayDescriptor {
    pub change_event_name: String,
}

#[derive(Debug, Clone)]
pub struct TypeCatalog {
    controls: IndexMap<String, ControlDescriptor>,
    events: HashMap<String, IndexMap<String, EventDescriptor>>,
    two_way: HashMap<String, HashMap<String, TwoWayDescriptor>>,
    property_scopes: IndexMap<String, IndexMap<String, PropertyDescriptor>>,
    known_event_names: HashSet<String>,
}

impl TypeCatalog {
    /// The built-in Terminal.Gui v2 catalog.
    pub fn terminal_gui() -> Self {
        Self::from_schema(&CONTROL_SCHEMA, &PROPERTY_SCHEMA)
    }

    /// Build a catalog from encoded schema lines. Malformed lines are skipped.
    pub fn from_schema(control_lines: &[&str], property_lines: &[&str]) -> Self {
        let mut controls = IndexMap::new();
        let mut events: HashMap<String, IndexMap<String, EventDescriptor>> = HashMap::new();
        let mut two_way: HashMap<String, HashMap<String, TwoWayDescriptor>> = HashMap::new();
        let mut known_event_names = HashSet::new();

        for line in control_lines {
            let Some((head, members)) = line.split_once('|') else {
                continue;
            };
            let Some((name, type_and_flags)) = head.split_once('=') else {
                continue;
            };

            let mut flags = type_and_flags.split(':');
            let output_type = flags.next().unwrap_or_default().to_string();
            let mut descriptor = ControlDescriptor {
                output_type,
                is_container: false,
                is_generic: false,
                has_button_slot: false,
                is_action_button: false,
            };
            for flag in flags {
                match flag {
                    "container" => descriptor.is_container = true,
                    "generic" => descriptor.is_generic = true,
                    "button-slot" => descriptor.has_button_slot = true,
                    "action" => descriptor.is_action_button = true,
                    _ => {}
                }
            }
            controls.insert(name.to_string(), descriptor);

            let control_events = events.entry(name.to_string()).or_default();
            for member in members.split(',').filter(|m| !m.is_empty()) {
                if let Some(rest) = member.strip_prefix("<>") {
                    if let Some((property, change_event)) = rest.split_once('>') {
                        two_way.entry(name.to_string()).or_default().insert(
                            property.to_string(),
                            TwoWayDescriptor {
                                change_event_name: change_event.to_string(),
                            },
                        );
                    }
                } else if let Some(rest) = member.strip_prefix('*') {
                    let (obsolete, rest) = match rest.strip_prefix('~') {
                        Some(rest) => (true, rest),
                        None => (false, rest),
                    };
                    let Some((names, delegate)) = rest.split_once('=') else {
                        continue;
                    };
                    let (event, replacement) = match names.split_once('>') {
                        Some((event, replacement)) => (event, Some(replacement.to_string())),
                        None => (names, None),
                    };
                    if event.is_empty() {
                        continue;
                    }
                    known_event_names.insert(event.to_string());
                    control_events.insert(
                        event.to_string(),
                        EventDescriptor::new(delegate, obsolete, replacement),
                    );
                }
            }
        }

        let mut property_scopes: IndexMap<String, IndexMap<String, PropertyDescriptor>> =
            IndexMap::new();
        for line in property_lines {
            let Some((scope, properties)) = line.split_once('|') else {
                continue;
            };
            let scope_map = property_scopes.entry(scope.to_string()).or_default();
            for property in properties.split(',').filter(|p| !p.is_empty()) {
                let (name, semantic_type) = decode_property(property);
                scope_map.insert(name.to_string(), PropertyDescriptor { semantic_type });
            }
        }

        TypeCatalog {
            controls,
            events,
            two_way,
            property_scopes,
            known_event_names,
        }
    }

    pub fn resolve_control(&self, type_name: &str) -> Option<&ControlDescriptor> {
        self.controls.get(type_name)
    }

    pub fn is_container(&self, type_name: &str) -> bool {
        self.resolve_control(type_name)
            .map(|c| c.is_container)
            .unwrap_or(false)
    }

    pub fn resolve_event(&self, type_name: &str, event_name: &str) -> Option<&EventDescriptor> {
        self.events.get(type_name)?.get(event_name)
    }

    /// Common scope first, then per-control scopes in declaration order. First match wins.
    pub fn resolve_property(&self, property_name: &str) -> Option<&PropertyDescriptor> {
        if let Some(found) = self
            .property_scopes
            .get(COMMON_SCOPE)
            .and_then(|scope| scope.get(property_name))
        {
            return Some(found);
        }
        self.property_scopes
            .iter()
            .filter(|(scope, _)| scope.as_str() != COMMON_SCOPE)
            .find_map(|(_, scope)| scope.get(property_name))
    }

    pub fn resolve_two_way(&self, type_name: &str, property_name: &str) -> Option<&TwoWayDescriptor> {
        self.two_way.get(type_name)?.get(property_name)
    }

    /// True if any registered control declares this event.
    pub fn is_known_event_name(&self, event_name: &str) -> bool {
        self.known_event_names.contains(event_name)
    }

    /// True when `child` attaches to `parent` through the dialog button slot.
    pub fn uses_button_slot(&self, parent: &str, child: &str) -> bool {
        let parent_has_slot = self
            .resolve_control(parent)
            .map(|c| c.has_button_slot)
            .unwrap_or(false);
        let child_is_action = self
            .resolve_control(child)
            .map(|c| c.is_action_button)
            .unwrap_or(false);
        parent_has_slot && child_is_action
    }

    /// Output type for `type_name`, closed over `generic` when the control is generic.
    pub fn output_type_with_generic(&self, type_name: &str, generic: Option<&str>) -> Option<String> {
        self.resolve_control(type_name)
            .map(|control| control.output_type_with(generic))
    }

    pub fn control_names(&self) -> Vec<&str> {
        self.controls.keys().map(String::as_str).collect()
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::terminal_gui()
    }
}

fn decode_property(encoded: &str) -> (&str, SemanticType) {
    let mut chars = encoded.chars();
    match chars.next() {
        Some('!') => (&encoded[1..], SemanticType::Bool),
        Some('#') => (&encoded[1..], SemanticType::Int),
        Some('$') => (&encoded[1..], SemanticType::Float),
        Some('@') => (&encoded[1..], SemanticType::Array),
        Some('^') => (&encoded[1..], SemanticType::Layout),
        Some('&') => (&encoded[1..], SemanticType::Command),
        Some('%') => match encoded[1..].split_once('=') {
            Some((name, full_type)) => (name, SemanticType::QualifiedType(full_type.to_string())),
            None => (&encoded[1..], SemanticType::String),
        },
        _ => (encoded, SemanticType::String),
    }
}
