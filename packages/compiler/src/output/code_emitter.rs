//! Code Emitter
//!
//! Turns a validated [`Document`] into a C# partial class:
//!
//! - one field per control, declared in document order
//! - `InitializeComponent()` building the control tree top-down
//! - `SetupBindings()`, the change-notification dispatcher and two-way reverse handlers when the
//!   document carries bindings
//!
//! Emission never aborts on an unknown type. Placeholders are substituted and the problem is
//! reported as a diagnostic so the rest of the tree still emits.

use super::abstract_emitter::EmitterVisitorContext;
use super::field_map::{FieldMap, SELF_REFERENCE};
use super::literals::{convert_literal, Literal};
use crate::config::CompilerOptions;
use crate::diagnostics::{messages, Diagnostic, DiagnosticCode};
use crate::error::Result;
use crate::expression_parser::{BindingMode, BoundControl, BoundProperty, Parser as BindingParser};
use crate::ml_parser::ast::{is_binding_value, Document, Element};
use crate::schema::{SemanticType, TypeCatalog, DEFAULT_EVENT_ARGS};
use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::trace;

const USINGS: [&str; 5] = [
    "System",
    "System.ComponentModel",
    "Terminal.Gui",
    "Terminal.Gui.Views",
    "Terminal.Gui.ViewBase",
];

const PROPERTY_CHANGED_HANDLER: &str = "OnViewModelPropertyChanged";
const ACTIVATION_EVENT: &str = "Accepting";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOutput {
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct CodeEmitter<'a> {
    catalog: &'a TypeCatalog,
    options: &'a CompilerOptions,
    binding_parser: BindingParser,
}

impl<'a> CodeEmitter<'a> {
    pub fn new(catalog: &'a TypeCatalog, options: &'a CompilerOptions) -> Self {
        CodeEmitter {
            catalog,
            options,
            binding_parser: BindingParser::new(),
        }
    }

    /// Emit `document`. `data_context_hint` is the already-resolved data-context member, if any.
    pub fn emit(&self, document: &Document, data_context_hint: Option<&str>) -> Result<EmitOutput> {
        let mut diagnostics = Vec::new();
        let fields = FieldMap::build(document, self.catalog, &mut diagnostics);
        let bound = collect_bound_controls(
            document,
            self.catalog,
            &self.binding_parser,
            data_context_hint,
            &fields,
        )?;
        let binding_source = data_context_hint
            .map(str::to_string)
            .or_else(|| detect_binding_source(&bound));

        let mut pass = EmitPass {
            catalog: self.catalog,
            document,
            fields: &fields,
            ctx: EmitterVisitorContext::create_root(self.options.indent_width),
            diagnostics,
        };
        pass.emit_class(&bound, binding_source.as_deref())?;

        Ok(EmitOutput {
            source: pass.ctx.to_source()?,
            diagnostics: pass.diagnostics,
        })
    }
}

/// Every element carrying at least one well-formed binding, in document order.
pub fn collect_bound_controls(
    document: &Document,
    catalog: &TypeCatalog,
    binding_parser: &BindingParser,
    data_context_hint: Option<&str>,
    fields: &FieldMap,
) -> Result<Vec<BoundControl>> {
    let mut bound = Vec::new();
    for element in document.root.descendants() {
        let bound_properties: SmallVec<[BoundProperty; 2]> = element
            .property_attributes()
            .filter(|(_, value)| is_binding_value(value))
            .filter_map(|(property, value)| {
                let binding = binding_parser.parse_binding(value, data_context_hint)?;
                let is_command = matches!(
                    catalog.resolve_property(property).map(|p| &p.semantic_type),
                    Some(SemanticType::Command)
                );
                Some(BoundProperty {
                    property_name: property.to_string(),
                    binding,
                    is_command,
                })
            })
            .collect();
        if bound_properties.is_empty() {
            continue;
        }
        bound.push(BoundControl {
            element_index: element.index,
            element_type_name: element.type_name.clone(),
            field_id: fields.reference(element.index)?.to_string(),
            bound_properties,
        });
    }
    Ok(bound)
}

/// Root segment of the first dotted binding path, if any.
fn detect_binding_source(bound: &[BoundControl]) -> Option<String> {
    bound
        .iter()
        .flat_map(|control| control.bound_properties.iter())
        .find(|property| property.binding.is_qualified())
        .map(|property| property.binding.root_segment().to_string())
}

fn split_class_name(class_name: &str) -> (Option<&str>, &str) {
    match class_name.rsplit_once('.') {
        Some((namespace, simple)) => (Some(namespace), simple),
        None => (None, class_name),
    }
}

enum EmitStep<'e> {
    Build(&'e Element),
    Attach { parent: &'e Element, child: &'e Element },
}

struct EmitPass<'e> {
    catalog: &'e TypeCatalog,
    document: &'e Document,
    fields: &'e FieldMap,
    ctx: EmitterVisitorContext,
    diagnostics: Vec<Diagnostic>,
}

impl<'e> EmitPass<'e> {
    fn report(&mut self, element: &Element, code: DiagnosticCode, message: String) {
        self.diagnostics.push(
            Diagnostic::new(code, &self.document.source_file_path, message)
                .at(element.source_line, element.source_column),
        );
    }

    fn emit_class(&mut self, bound: &[BoundControl], binding_source: Option<&str>) -> Result<()> {
        self.ctx.println("// <auto-generated />");
        self.ctx.println("#nullable enable");
        self.ctx.blank_line();
        for using in USINGS {
            self.ctx.println(&format!("using {};", using));
        }
        self.ctx.blank_line();

        let document = self.document;
        let (namespace, simple_name) = split_class_name(&document.class_name);
        if let Some(namespace) = namespace {
            self.ctx.println(&format!("namespace {}", namespace));
            self.ctx.open_block();
        }

        let root_type = self.fields.output_type(document.root.index)?;
        self.ctx
            .println(&format!("partial class {} : {}", simple_name, root_type));
        self.ctx.open_block();

        let declarations: Vec<String> = self
            .fields
            .declarations()
            .map(|(output_type, name)| format!("private {} {} = null!;", output_type, name))
            .collect();
        for declaration in &declarations {
            self.ctx.println(declaration);
        }
        self.ctx.blank_line();

        self.emit_initialize_component(!bound.is_empty())?;

        if !bound.is_empty() {
            self.ctx.blank_line();
            self.emit_setup_bindings(bound, binding_source)?;
            self.ctx.blank_line();
            self.emit_property_changed_handler(bound)?;
            self.emit_two_way_handlers(bound)?;
        }

        self.ctx.close_block("}")?;
        if namespace.is_some() {
            self.ctx.close_block("}")?;
        }
        Ok(())
    }

    fn emit_initialize_component(&mut self, has_bindings: bool) -> Result<()> {
        let document = self.document;
        let root = &document.root;
        self.ctx.println("private void InitializeComponent()");
        self.ctx.open_block();

        if let Some(name) = root.explicit_name() {
            self.ctx.println(&format!("{} = {};", name, SELF_REFERENCE));
        }
        self.emit_tree(root)?;

        if has_bindings {
            self.ctx.blank_line();
            self.ctx.println("SetupBindings();");
        }
        self.ctx.close_block("}")
    }

    /// Depth-first over an explicit stack. A child's subtree is emitted before the child is
    /// attached to its parent.
    fn emit_tree(&mut self, root: &'e Element) -> Result<()> {
        let mut stack = vec![EmitStep::Build(root)];
        while let Some(step) = stack.pop() {
            match step {
                EmitStep::Build(element) => {
                    self.emit_element(element)?;
                    for child in element.children.iter().rev() {
                        stack.push(EmitStep::Attach { parent: element, child });
                        stack.push(EmitStep::Build(child));
                    }
                }
                EmitStep::Attach { parent, child } => self.attach_child(parent, child)?,
            }
        }
        Ok(())
    }

    fn emit_element(&mut self, element: &Element) -> Result<()> {
        trace!(element = %element.type_name, index = element.index, "emitting element");
        let reference = self.fields.reference(element.index)?.to_string();

        if element.index != self.document.root.index {
            let output_type = self.fields.output_type(element.index)?;
            self.ctx
                .println(&format!("{} = new {}();", reference, output_type));
        }

        for (property, value) in element.property_attributes() {
            if is_binding_value(value) {
                continue;
            }
            let semantic_type = self
                .catalog
                .resolve_property(property)
                .map(|descriptor| &descriptor.semantic_type);
            let literal = convert_literal(value, semantic_type);
            if let Literal::Verbatim { expected, .. } = &literal {
                let message = messages::invalid_property_value(property, value, expected);
                self.report(element, DiagnosticCode::InvalidPropertyValue, message);
            }
            self.ctx
                .println(&format!("{}.{} = {};", reference, property, literal.code()));
        }

        for (event, handler) in element.event_attributes() {
            let obsolete = self
                .catalog
                .resolve_event(&element.type_name, event)
                .filter(|descriptor| descriptor.obsolete);
            if let Some(descriptor) = obsolete {
                let message = messages::obsolete_event_used(
                    event,
                    &element.type_name,
                    descriptor.replacement.as_deref(),
                );
                self.report(element, DiagnosticCode::ObsoleteEventUsed, message);
                continue;
            }
            self.ctx
                .println(&format!("{}.{} += {};", reference, event, handler.trim()));
        }

        Ok(())
    }

    fn attach_child(&mut self, parent: &Element, child: &Element) -> Result<()> {
        let reference = self.fields.reference(parent.index)?;
        let child_reference = self.fields.reference(child.index)?;
        let attach = if self
            .catalog
            .uses_button_slot(&parent.type_name, &child.type_name)
        {
            "AddButton"
        } else {
            "Add"
        };
        self.ctx
            .println(&format!("{}.{}({});", reference, attach, child_reference));
        Ok(())
    }

    fn emit_setup_bindings(&mut self, bound: &[BoundControl], binding_source: Option<&str>) -> Result<()> {
        self.ctx.println("private void SetupBindings()");
        self.ctx.open_block();

        if let Some(source) = binding_source {
            self.ctx.println(&format!(
                "if ({0} == null) throw new InvalidOperationException(\"{0} property must be set before calling InitializeComponent\");",
                source
            ));
            self.ctx.blank_line();
        }

        for control in bound {
            for property in &control.bound_properties {
                let source = &property.binding.source_expression;
                if property.is_command {
                    self.ctx.println(&format!("// Wire up command: {}", source));
                    self.ctx.println(&format!(
                        "{}.{} += (s, e) => {{",
                        control.field_id, ACTIVATION_EVENT
                    ));
                    self.ctx.inc_indent();
                    self.ctx
                        .println(&format!("if ({}?.CanExecute(null) == true)", source));
                    self.ctx.inc_indent();
                    self.ctx.println(&format!("{}.Execute(null);", source));
                    self.ctx.dec_indent()?;
                    self.ctx.close_block("};")?;
                } else {
                    self.ctx.println(&format!(
                        "{}.{} = {};",
                        control.field_id, property.property_name, source
                    ));
                }
            }
        }

        self.ctx.blank_line();
        self.ctx.println("// Subscribe to property changes");
        match binding_source {
            Some(source) => self.ctx.println(&format!(
                "{}.PropertyChanged += {};",
                source, PROPERTY_CHANGED_HANDLER
            )),
            None => self
                .ctx
                .println(&format!("PropertyChanged += {};", PROPERTY_CHANGED_HANDLER)),
        }

        for control in bound {
            for property in two_way_properties(control) {
                let Some(two_way) = self
                    .catalog
                    .resolve_two_way(&control.element_type_name, &property.property_name)
                else {
                    continue;
                };
                self.ctx.println(&format!(
                    "{}.{} += {};",
                    control.field_id,
                    two_way.change_event_name,
                    reverse_handler_name(control, property)
                ));
            }
        }

        for control in bound {
            for property in control.bound_properties.iter().filter(|p| p.is_command) {
                let source = &property.binding.source_expression;
                let field = &control.field_id;
                self.ctx
                    .println(&format!("// Subscribe to CanExecuteChanged for {}", field));
                self.ctx.println(&format!("if ({} != null)", source));
                self.ctx.open_block();
                self.ctx
                    .println(&format!("{}.CanExecuteChanged += (s, e) => {{", source));
                self.ctx.inc_indent();
                self.ctx
                    .println(&format!("{}.Enabled = {}.CanExecute(null);", field, source));
                self.ctx.close_block("};")?;
                self.ctx.println("// Set initial Enabled state");
                self.ctx
                    .println(&format!("{}.Enabled = {}.CanExecute(null);", field, source));
                self.ctx.close_block("}")?;
            }
        }

        self.ctx.close_block("}")
    }

    /// One `case` per distinct source member; commands never take part.
    fn emit_property_changed_handler(&mut self, bound: &[BoundControl]) -> Result<()> {
        let mut groups: IndexMap<&str, Vec<String>> = IndexMap::new();
        for control in bound {
            for property in control.bound_properties.iter().filter(|p| !p.is_command) {
                let assignment = format!(
                    "{}.{} = {};",
                    control.field_id, property.property_name, property.binding.source_expression
                );
                let group = groups.entry(property.binding.source_member()).or_default();
                if !group.contains(&assignment) {
                    group.push(assignment);
                }
            }
        }

        self.ctx.println(&format!(
            "private void {}(object? sender, PropertyChangedEventArgs e)",
            PROPERTY_CHANGED_HANDLER
        ));
        self.ctx.open_block();
        self.ctx.println("switch (e.PropertyName)");
        self.ctx.open_block();
        for (member, assignments) in &groups {
            self.ctx.println(&format!("case \"{}\":", member));
            self.ctx.inc_indent();
            for assignment in assignments {
                self.ctx.println(assignment);
            }
            self.ctx.println("break;");
            self.ctx.dec_indent()?;
        }
        self.ctx.close_block("}")?;
        self.ctx.close_block("}")
    }

    fn emit_two_way_handlers(&mut self, bound: &[BoundControl]) -> Result<()> {
        for control in bound {
            for property in two_way_properties(control) {
                let Some(two_way) = self
                    .catalog
                    .resolve_two_way(&control.element_type_name, &property.property_name)
                else {
                    continue;
                };
                let argument_type = self
                    .catalog
                    .resolve_event(&control.element_type_name, &two_way.change_event_name)
                    .map(|event| event.argument_type.clone())
                    .unwrap_or_else(|| DEFAULT_EVENT_ARGS.to_string());
                let source = &property.binding.source_expression;
                let target = format!("{}.{}", control.field_id, property.property_name);

                self.ctx.blank_line();
                self.ctx.println(&format!(
                    "private void {}(object? sender, {} e)",
                    reverse_handler_name(control, property),
                    argument_type
                ));
                self.ctx.open_block();
                self.ctx.println(&format!("if ({} != {})", source, target));
                self.ctx.inc_indent();
                self.ctx.println(&format!("{} = {};", source, target));
                self.ctx.dec_indent()?;
                self.ctx.close_block("}")?;
            }
        }
        Ok(())
    }
}

fn two_way_properties(control: &BoundControl) -> impl Iterator<Item = &BoundProperty> {
    control
        .bound_properties
        .iter()
        .filter(|p| p.binding.mode == BindingMode::TwoWay && !p.is_command)
}

/// `On<field><Property>Changed`; an unnamed root contributes its type name.
fn reverse_handler_name(control: &BoundControl, property: &BoundProperty) -> String {
    let stem = if control.field_id == SELF_REFERENCE {
        control.element_type_name.as_str()
    } else {
        control.field_id.as_str()
    };
    format!("On{}{}Changed", stem, property.property_name)
}
