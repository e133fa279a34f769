/**
 * Markup Parser Tests
 *
 * Document parsing: element tree, locations, attribute classification and the
 * document-level diagnostics (empty, malformed, missing class name)
 */

#[cfg(test)]
mod xml_parser_tests {
    use pretty_assertions::assert_eq;
    use tui_xaml_compiler::diagnostics::DiagnosticCode;
    use tui_xaml_compiler::ml_parser::{AttributeKind, Document, XmlParser};
    use tui_xaml_compiler::{Diagnostic, TypeCatalog};

    const PATH: &str = "Views/Main.tui.xaml";

    fn parse(source: &str) -> Result<Document, Diagnostic> {
        let catalog = TypeCatalog::terminal_gui();
        XmlParser::new(&catalog).parse(source, PATH)
    }

    fn parse_ok(source: &str) -> Document {
        match parse(source) {
            Ok(document) => document,
            Err(diagnostic) => panic!("unexpected diagnostic: {}", diagnostic),
        }
    }

    fn parse_err(source: &str) -> Diagnostic {
        match parse(source) {
            Ok(_) => panic!("expected a diagnostic"),
            Err(diagnostic) => diagnostic,
        }
    }

    mod document {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_read_class_name_and_data_type() {
            let document = parse_ok(
                r#"<Window x:Class=" App.Views.Main " x:DataType="ViewModel"></Window>"#,
            );
            assert_eq!(document.class_name, "App.Views.Main");
            assert_eq!(document.data_context_hint.as_deref(), Some("ViewModel"));
            assert_eq!(document.source_file_path, PATH);
        }

        #[test]
        fn should_treat_blank_data_type_as_absent() {
            let document = parse_ok(r#"<Window x:Class="A.B" x:DataType="  " />"#);
            assert_eq!(document.data_context_hint, None);
        }

        #[test]
        fn should_strip_namespace_prefix_from_element_names() {
            let document = parse_ok(
                r#"<ui:Window xmlns:ui="urn:tui" x:Class="A.B"><ui:Label /></ui:Window>"#,
            );
            assert_eq!(document.root.type_name, "Window");
            assert_eq!(document.root.children[0].type_name, "Label");
        }

        #[test]
        fn should_ignore_text_comments_and_declaration() {
            let document = parse_ok(
                "<?xml version=\"1.0\"?>\n<!-- view -->\n<Window x:Class=\"A.B\">text<![CDATA[raw]]><Label/></Window>\n",
            );
            assert_eq!(document.element_count(), 2);
        }
    }

    mod locations {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_record_one_based_line_and_column_of_name() {
            let document = parse_ok("<Window x:Class=\"A.B\">\n    <Label />\n  <Button/>\n</Window>");
            assert_eq!((document.root.source_line, document.root.source_column), (1, 2));
            let label = &document.root.children[0];
            assert_eq!((label.source_line, label.source_column), (2, 6));
            let button = &document.root.children[1];
            assert_eq!((button.source_line, button.source_column), (3, 4));
        }

        #[test]
        fn should_number_elements_in_pre_order() {
            let document = parse_ok(
                r#"<Window x:Class="A.B"><FrameView><Label/></FrameView><Button/></Window>"#,
            );
            let indices: Vec<usize> = document.root.descendants().iter().map(|e| e.index).collect();
            assert_eq!(indices, vec![0, 1, 2, 3]);
        }
    }

    mod attributes {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_classify_attributes_once() {
            let document = parse_ok(
                r#"<Window x:Class="A.B"><Button x:Name="ok" Text="OK" Accepting="OnOk" Clicked="{Bind Click}" /></Window>"#,
            );
            let button = &document.root.children[0];
            assert_eq!(button.attributes["x:Name"].kind, AttributeKind::Reserved);
            assert_eq!(button.attributes["Text"].kind, AttributeKind::Property);
            assert_eq!(button.attributes["Accepting"].kind, AttributeKind::Event);
            assert_eq!(button.attributes["Clicked"].kind, AttributeKind::Property);
            assert_eq!(button.explicit_name(), Some("ok"));
        }

        #[test]
        fn should_never_treat_code_expressions_as_events() {
            let document =
                parse_ok(r#"<Window x:Class="A.B"><Button Accepting="Make(handler)" /></Window>"#);
            let button = &document.root.children[0];
            assert_eq!(button.event_attributes().count(), 0);
            assert_eq!(button.property_attributes().count(), 1);
        }

        #[test]
        fn should_sort_attributes_by_key() {
            let a = parse_ok(r#"<Window x:Class="A.B"><Label Y="1" Text="t" X="2" /></Window>"#);
            let b = parse_ok(r#"<Window x:Class="A.B"><Label X="2" Y="1" Text="t" /></Window>"#);
            let keys = |d: &Document| -> Vec<String> {
                d.root.children[0]
                    .property_attributes()
                    .map(|(k, _)| k.to_string())
                    .collect()
            };
            assert_eq!(keys(&a), vec!["Text", "X", "Y"]);
            assert_eq!(keys(&a), keys(&b));
        }

        #[test]
        fn should_expose_generic_argument() {
            let document = parse_ok(
                r#"<Window x:Class="A.B"><OptionSelector x:Type="Theme" /></Window>"#,
            );
            assert_eq!(document.root.children[0].generic_argument(), Some("Theme"));
        }
    }

    mod diagnostics {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_report_empty_document() {
            let diagnostic = parse_err(" \n\t ");
            assert_eq!(diagnostic.code, DiagnosticCode::EmptyDocument);
            assert_eq!(diagnostic.file_path, PATH);
        }

        #[test]
        fn should_report_mismatched_closing_tag_with_location() {
            let diagnostic = parse_err("<Window x:Class=\"A.B\">\n</View>");
            assert_eq!(diagnostic.code, DiagnosticCode::MalformedMarkup);
            assert_eq!((diagnostic.line, diagnostic.column), (2, 1));
            assert!(diagnostic.message.contains("Unexpected closing tag \"View\""));
        }

        #[test]
        fn should_report_unclosed_element() {
            let diagnostic = parse_err(r#"<Window x:Class="A.B"><Label>"#);
            assert_eq!(diagnostic.code, DiagnosticCode::MalformedMarkup);
            assert!(diagnostic.message.contains("Unclosed element \"Label\""));
        }

        #[test]
        fn should_report_multiple_roots() {
            let diagnostic = parse_err(r#"<Window x:Class="A.B" /><Window />"#);
            assert_eq!(diagnostic.code, DiagnosticCode::MalformedMarkup);
        }

        #[test]
        fn should_report_duplicate_attribute() {
            let diagnostic = parse_err(r#"<Window x:Class="A.B" Title="a" Title="b" />"#);
            assert_eq!(diagnostic.code, DiagnosticCode::MalformedMarkup);
            assert!(diagnostic.message.contains("Duplicate attribute \"Title\""));
        }

        #[test]
        fn should_report_doctype() {
            let diagnostic = parse_err("<!DOCTYPE Window><Window x:Class=\"A.B\" />");
            assert_eq!(diagnostic.code, DiagnosticCode::MalformedMarkup);
        }

        #[test]
        fn should_report_text_outside_root() {
            let diagnostic = parse_err(r#"<Window x:Class="A.B" /> trailing"#);
            assert_eq!(diagnostic.code, DiagnosticCode::MalformedMarkup);
        }

        #[test]
        fn should_report_missing_class_name_at_root() {
            let diagnostic = parse_err("\n  <Window Title=\"t\" />");
            assert_eq!(diagnostic.code, DiagnosticCode::MissingClassName);
            assert_eq!((diagnostic.line, diagnostic.column), (2, 4));
        }

        #[test]
        fn should_report_blank_class_name() {
            let diagnostic = parse_err(r#"<Window x:Class="   " />"#);
            assert_eq!(diagnostic.code, DiagnosticCode::MissingClassName);
        }

        #[test]
        fn should_report_markup_without_root() {
            let diagnostic = parse_err("<!-- nothing here -->");
            assert_eq!(diagnostic.code, DiagnosticCode::MalformedMarkup);
            assert!(diagnostic.message.contains("No root element found"));
        }
    }
}
