/**
 * Type Catalog Tests
 *
 * Lookups over the built-in Terminal.Gui catalog and custom schema lines
 */

#[cfg(test)]
mod type_catalog_tests {
    use pretty_assertions::assert_eq;
    use tui_xaml_compiler::schema::{SemanticType, TypeCatalog};

    mod controls {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_resolve_known_controls() {
            let catalog = TypeCatalog::terminal_gui();
            assert_eq!(
                catalog.resolve_control("Button").map(|c| c.output_type.as_str()),
                Some("Terminal.Gui.Views.Button")
            );
            assert!(catalog.resolve_control("Gizmo").is_none());
            assert!(catalog.resolve_control("button").is_none());
        }

        #[test]
        fn should_know_containers() {
            let catalog = TypeCatalog::terminal_gui();
            for container in ["Window", "View", "Dialog", "FrameView", "StatusBar"] {
                assert!(catalog.is_container(container), "{} should be a container", container);
            }
            for leaf in ["Label", "Button", "TextField", "Gizmo"] {
                assert!(!catalog.is_container(leaf), "{} should not be a container", leaf);
            }
        }

        #[test]
        fn should_close_generic_output_type() {
            let catalog = TypeCatalog::terminal_gui();
            assert_eq!(
                catalog.output_type_with_generic("OptionSelector", Some("Theme")).as_deref(),
                Some("Terminal.Gui.Views.OptionSelector<Theme>")
            );
            assert_eq!(
                catalog.output_type_with_generic("Label", Some("Theme")).as_deref(),
                Some("Terminal.Gui.Views.Label")
            );
            assert_eq!(catalog.output_type_with_generic("Gizmo", None), None);
        }

        #[test]
        fn should_attach_buttons_to_dialog_slot_only() {
            let catalog = TypeCatalog::terminal_gui();
            assert!(catalog.uses_button_slot("Dialog", "Button"));
            assert!(!catalog.uses_button_slot("Window", "Button"));
            assert!(!catalog.uses_button_slot("Dialog", "Label"));
        }

        #[test]
        fn should_list_controls_in_declaration_order() {
            let catalog = TypeCatalog::terminal_gui();
            let names = catalog.control_names();
            assert_eq!(&names[..3], &["Window", "View", "Dialog"]);
            assert_eq!(names.len(), 20);
        }
    }

    mod events {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_resolve_events_per_type() {
            let catalog = TypeCatalog::terminal_gui();
            let accepting = catalog.resolve_event("Button", "Accepting").unwrap();
            assert_eq!(accepting.argument_type, "System.EventArgs");
            assert!(!accepting.obsolete);
            assert!(catalog.resolve_event("Label", "Accepting").is_none());
        }

        #[test]
        fn should_mark_obsolete_events_with_replacement() {
            let catalog = TypeCatalog::terminal_gui();
            let clicked = catalog.resolve_event("Button", "Clicked").unwrap();
            assert!(clicked.obsolete);
            assert_eq!(clicked.replacement.as_deref(), Some("Accepting"));
            let toggled = catalog.resolve_event("CheckBox", "Toggled").unwrap();
            assert_eq!(toggled.replacement.as_deref(), Some("ValueChanged"));
        }

        #[test]
        fn should_know_event_names_across_types() {
            let catalog = TypeCatalog::terminal_gui();
            assert!(catalog.is_known_event_name("Accepting"));
            assert!(catalog.is_known_event_name("TextChanged"));
            assert!(!catalog.is_known_event_name("Text"));
        }

        #[test]
        fn should_extract_generic_event_arguments() {
            let catalog = TypeCatalog::terminal_gui();
            assert_eq!(
                catalog.resolve_event("ListView", "ValueChanged").unwrap().argument_type,
                "Terminal.Gui.App.ValueChangedEventArgs<int?>"
            );
        }
    }

    mod properties {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_resolve_common_scope_first() {
            let catalog = TypeCatalog::terminal_gui();
            assert_eq!(
                catalog.resolve_property("Text").map(|p| &p.semantic_type),
                Some(&SemanticType::String)
            );
            assert_eq!(
                catalog.resolve_property("Width").map(|p| &p.semantic_type),
                Some(&SemanticType::Layout)
            );
        }

        #[test]
        fn should_take_first_match_across_type_scopes() {
            let catalog = TypeCatalog::terminal_gui();
            assert_eq!(
                catalog.resolve_property("HotKey").map(|p| &p.semantic_type),
                Some(&SemanticType::QualifiedType("Terminal.Gui.Input.Key".to_string()))
            );
            assert_eq!(
                catalog.resolve_property("Command").map(|p| &p.semantic_type),
                Some(&SemanticType::Command)
            );
            assert_eq!(
                catalog.resolve_property("Fraction").map(|p| &p.semantic_type),
                Some(&SemanticType::Float)
            );
            assert!(catalog.resolve_property("Nope").is_none());
        }

        #[test]
        fn should_preserve_shadowing_order() {
            let catalog = TypeCatalog::from_schema(
                &["Box=Ns.Box|"],
                &["Common|!Flag", "Box|#Flag,#Size", "Other|$Size"],
            );
            assert_eq!(
                catalog.resolve_property("Flag").map(|p| &p.semantic_type),
                Some(&SemanticType::Bool)
            );
            assert_eq!(
                catalog.resolve_property("Size").map(|p| &p.semantic_type),
                Some(&SemanticType::Int)
            );
        }
    }

    mod two_way {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_resolve_registered_pairs() {
            let catalog = TypeCatalog::terminal_gui();
            assert_eq!(
                catalog
                    .resolve_two_way("TextField", "Text")
                    .map(|t| t.change_event_name.as_str()),
                Some("TextChanged")
            );
            assert_eq!(
                catalog
                    .resolve_two_way("CheckBox", "Checked")
                    .map(|t| t.change_event_name.as_str()),
                Some("ValueChanged")
            );
        }

        #[test]
        fn should_not_resolve_unregistered_pairs() {
            let catalog = TypeCatalog::terminal_gui();
            assert!(catalog.resolve_two_way("Label", "Text").is_none());
            assert!(catalog.resolve_two_way("TextField", "Title").is_none());
        }
    }
}
