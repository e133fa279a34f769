/**
 * Binding Expression Parser Tests
 *
 * `{Bind ...}` grammar, modes and source-expression resolution
 */

#[cfg(test)]
mod binding_parser_tests {
    use pretty_assertions::assert_eq;
    use tui_xaml_compiler::expression_parser::{BindingExpression, BindingMode, Parser};

    fn parse(text: &str, hint: Option<&str>) -> Option<BindingExpression> {
        Parser::new().parse_binding(text, hint)
    }

    mod source_expression {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_self_bind_without_hint() {
            let binding = parse("{Bind Status}", None).unwrap();
            assert_eq!(binding.source_expression, "Status");
            assert_eq!(binding.property_path, "Status");
        }

        #[test]
        fn should_prefix_bare_path_with_hint() {
            let binding = parse("{Bind Status}", Some("Vm")).unwrap();
            assert_eq!(binding.source_expression, "Vm.Status");
            assert_eq!(binding.property_path, "Status");
        }

        #[test]
        fn should_ignore_hint_for_dotted_path() {
            let binding = parse("{Bind Vm.Status}", Some("Vm")).unwrap();
            assert_eq!(binding.source_expression, "Vm.Status");
        }

        #[test]
        fn should_keep_dotted_path_verbatim_without_hint() {
            let binding = parse("{Bind ViewModel.User.Name}", None).unwrap();
            assert_eq!(binding.source_expression, "ViewModel.User.Name");
            assert_eq!(binding.source_member(), "Name");
        }
    }

    mod mode {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_default_to_one_way() {
            assert_eq!(parse("{Bind Status}", None).unwrap().mode, BindingMode::OneWay);
        }

        #[test]
        fn should_parse_two_way() {
            assert_eq!(
                parse("{Bind UserName, Mode=TwoWay}", None).unwrap().mode,
                BindingMode::TwoWay
            );
        }

        #[test]
        fn should_parse_mode_case_insensitively() {
            assert_eq!(
                parse("{Bind UserName, mode=twoway}", None).unwrap().mode,
                BindingMode::TwoWay
            );
            assert_eq!(
                parse("{Bind UserName,Mode = TWOWAY }", None).unwrap().mode,
                BindingMode::TwoWay
            );
        }

        #[test]
        fn should_keep_default_for_unknown_mode() {
            assert_eq!(
                parse("{Bind UserName, Mode=OneTime}", None).unwrap().mode,
                BindingMode::OneWay
            );
        }
    }

    mod grammar {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_tolerate_surrounding_whitespace() {
            let binding = parse("  {Bind   Status  }  ", None).unwrap();
            assert_eq!(binding.property_path, "Status");
        }

        #[test]
        fn should_reject_missing_prefix_or_suffix() {
            assert_eq!(parse("Status", None), None);
            assert_eq!(parse("{Bind Status", None), None);
            assert_eq!(parse("Bind Status}", None), None);
            assert_eq!(parse("{Binding Status}", None), None);
        }

        #[test]
        fn should_reject_invalid_paths() {
            assert_eq!(parse("{Bind }", None), None);
            assert_eq!(parse("{Bind .Status}", None), None);
            assert_eq!(parse("{Bind Status.}", None), None);
            assert_eq!(parse("{Bind Sta tus}", None), None);
            assert_eq!(parse("{Bind Items[0]}", None), None);
        }
    }
}
