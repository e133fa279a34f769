/**
 * Markup Lexer Tests
 *
 * Token stream, locations and lexical errors
 */

#[cfg(test)]
mod markup_lexer_tests {
    use pretty_assertions::assert_eq;
    use tui_xaml_compiler::ml_parser::lexer::tokenize;
    use tui_xaml_compiler::ml_parser::tokens::TokenType;

    fn humanize_parts(source: &str) -> Vec<(TokenType, Vec<String>)> {
        let result = tokenize(source);
        assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);
        result
            .tokens
            .into_iter()
            .map(|t| (t.token_type, t.parts))
            .collect()
    }

    fn humanize_line_column(source: &str) -> Vec<(TokenType, String)> {
        tokenize(source)
            .tokens
            .into_iter()
            .map(|t| (t.token_type, format!("{}:{}", t.source_span.start.line, t.source_span.start.col)))
            .collect()
    }

    fn first_error(source: &str) -> String {
        let result = tokenize(source);
        assert_eq!(result.errors.len(), 1, "expected exactly one error");
        result.errors[0].msg.clone()
    }

    mod line_column_numbers {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_work_without_newlines() {
            assert_eq!(
                humanize_line_column("<t>a</t>"),
                vec![
                    (TokenType::TagOpenStart, "0:0".to_string()),
                    (TokenType::TagOpenEnd, "0:2".to_string()),
                    (TokenType::Text, "0:3".to_string()),
                    (TokenType::TagClose, "0:4".to_string()),
                    (TokenType::Eof, "0:8".to_string()),
                ]
            );
        }

        #[test]
        fn should_normalize_crlf_before_counting() {
            assert_eq!(
                humanize_line_column("<t>\r\na</t>"),
                vec![
                    (TokenType::TagOpenStart, "0:0".to_string()),
                    (TokenType::TagOpenEnd, "0:2".to_string()),
                    (TokenType::Text, "0:3".to_string()),
                    (TokenType::TagClose, "1:1".to_string()),
                    (TokenType::Eof, "1:5".to_string()),
                ]
            );
        }
    }

    mod tags {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_parse_prefixed_names_verbatim() {
            assert_eq!(
                humanize_parts("<ui:Window></ui:Window>"),
                vec![
                    (TokenType::TagOpenStart, vec!["ui:Window".to_string()]),
                    (TokenType::TagOpenEnd, vec![]),
                    (TokenType::TagClose, vec!["ui:Window".to_string()]),
                    (TokenType::Eof, vec![]),
                ]
            );
        }

        #[test]
        fn should_allow_whitespace_before_close_bracket() {
            assert_eq!(
                humanize_parts("<Label /><Label\n/>")
                    .into_iter()
                    .map(|(t, _)| t)
                    .collect::<Vec<_>>(),
                vec![
                    TokenType::TagOpenStart,
                    TokenType::TagOpenEndVoid,
                    TokenType::TagOpenStart,
                    TokenType::TagOpenEndVoid,
                    TokenType::Eof,
                ]
            );
        }

        #[test]
        fn should_report_incomplete_tag() {
            assert_eq!(first_error("<Label"), "Unexpected end of input");
        }
    }

    mod attributes {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_parse_both_quote_styles() {
            assert_eq!(
                humanize_parts(r#"<a b="1" c='2'/>"#),
                vec![
                    (TokenType::TagOpenStart, vec!["a".to_string()]),
                    (TokenType::AttrName, vec!["b".to_string()]),
                    (TokenType::AttrValue, vec!["1".to_string()]),
                    (TokenType::AttrName, vec!["c".to_string()]),
                    (TokenType::AttrValue, vec!["2".to_string()]),
                    (TokenType::TagOpenEndVoid, vec![]),
                    (TokenType::Eof, vec![]),
                ]
            );
        }

        #[test]
        fn should_decode_entities_in_values() {
            let parts = humanize_parts(r#"<a t="&lt;&amp;&quot;&#65;&#x42;"/>"#);
            assert_eq!(parts[2], (TokenType::AttrValue, vec!["<&\"AB".to_string()]));
        }

        #[test]
        fn should_normalize_whitespace_in_values() {
            let parts = humanize_parts("<a t=\"x\ty\nz\"/>");
            assert_eq!(parts[2], (TokenType::AttrValue, vec!["x y z".to_string()]));
        }

        #[test]
        fn should_keep_binding_braces() {
            let parts = humanize_parts(r#"<a Text="{Bind Status, Mode=TwoWay}"/>"#);
            assert_eq!(
                parts[2],
                (TokenType::AttrValue, vec!["{Bind Status, Mode=TwoWay}".to_string()])
            );
        }

        #[test]
        fn should_reject_unquoted_values() {
            assert_eq!(first_error("<a b=c/>"), "Value of attribute \"b\" must be quoted");
        }

        #[test]
        fn should_reject_missing_values() {
            assert_eq!(first_error("<a b />"), "Attribute \"b\" is missing a value");
        }

        #[test]
        fn should_require_whitespace_between_attributes() {
            assert_eq!(
                first_error(r#"<a b="1"c="2"/>"#),
                "Whitespace is required between attributes"
            );
        }

        #[test]
        fn should_reject_lt_in_values() {
            assert_eq!(
                first_error(r#"<a b="<"/>"#),
                "The '<' character cannot be used in an attribute value"
            );
        }
    }

    mod entities {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_report_unknown_named_entity() {
            assert!(first_error("<a>&nbsp;</a>").starts_with("Unknown entity \"&nbsp;\""));
        }

        #[test]
        fn should_report_unterminated_character_reference() {
            assert!(first_error("<a>&#65</a>").starts_with("Unable to parse entity \"&#65\""));
        }
    }

    mod comments_and_declarations {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_tokenize_comments_and_processing_instructions() {
            assert_eq!(
                humanize_parts("<?xml version=\"1.0\"?><!-- hi --><a/>"),
                vec![
                    (TokenType::ProcessingInstruction, vec!["xml".to_string()]),
                    (TokenType::Comment, vec![" hi ".to_string()]),
                    (TokenType::TagOpenStart, vec!["a".to_string()]),
                    (TokenType::TagOpenEndVoid, vec![]),
                    (TokenType::Eof, vec![]),
                ]
            );
        }

        #[test]
        fn should_tokenize_cdata() {
            let parts = humanize_parts("<a><![CDATA[x < y]]></a>");
            assert_eq!(parts[2], (TokenType::Cdata, vec!["x < y".to_string()]));
        }

        #[test]
        fn should_report_unterminated_comment() {
            assert_eq!(first_error("<a/><!-- open"), "Unexpected end of input");
        }

        #[test]
        fn should_tokenize_doctype_with_internal_subset() {
            let types: Vec<TokenType> = humanize_parts("<!DOCTYPE a [<!ENTITY b \"c\">]><a/>")
                .into_iter()
                .map(|(t, _)| t)
                .collect();
            assert_eq!(types[0], TokenType::DocType);
            assert_eq!(types[1], TokenType::TagOpenStart);
        }
    }
}
