#[cfg(test)]
mod ambience_tests {
    use crate::syntax::MODIFIER_ORDER;
    use crate::*;
    use serde_json::json;
    use std::thread;

    const BILLING: &str = include_str!("../../tests/fixtures/billing.json");

    fn billing() -> ProjectContent {
        AssemblyParser::from_str(BILLING).unwrap()
    }

    fn type_handle(content: &ProjectContent, name: &str, arity: usize) -> EntityHandle {
        content.find_type(name, arity).unwrap().into()
    }

    fn member_handle(content: &ProjectContent, type_name: &str, arity: usize, name: &str) -> EntityHandle {
        let id = content.find_type(type_name, arity).unwrap();
        content
            .type_definition(id)
            .unwrap()
            .members
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.id.into())
            .unwrap()
    }

    fn convert(flags: ConversionFlags, entity: EntityHandle, content: &ProjectContent) -> String {
        CSharpAmbience::new(flags).convert_entity(entity, content).unwrap()
    }

    fn all_convertible_entities(content: &ProjectContent) -> Vec<EntityHandle> {
        let mut entities = Vec::new();
        for definition in content.types() {
            entities.push(EntityHandle::Type(definition.id));
            entities.extend(definition.members.iter().map(|m| EntityHandle::Member(m.id)));
        }
        entities
    }

    #[test]
    fn test_static_method_scenario() {
        let content = billing();
        let flags = ConversionFlags::SHOW_MODIFIERS
            | ConversionFlags::SHOW_ACCESSIBILITY
            | ConversionFlags::SHOW_RETURN_TYPE
            | ConversionFlags::SHOW_PARAMETER_LIST
            | ConversionFlags::SHOW_PARAMETER_NAMES;
        let foo = member_handle(&content, "Acme.Billing.Calculator", 0, "Foo");

        assert_eq!(convert(flags, foo, &content), "public static int Foo(string bar, int baz)");

        // Accessibility is its own facet on top of the modifiers facet
        let without_accessibility = flags.without(ConversionFlags::SHOW_ACCESSIBILITY);
        assert_eq!(
            convert(without_accessibility, foo, &content),
            "static int Foo(string bar, int baz)"
        );
    }

    #[test]
    fn test_indexer_scenario() {
        let content = billing();
        let indexer = member_handle(&content, "Acme.Billing.Ledger", 1, "Item");

        assert_eq!(convert(ConversionFlags::SHOW_PARAMETER_LIST, indexer, &content), "this[int]");
        assert_eq!(
            convert(ConversionFlags::STANDARD, indexer, &content),
            "public T this[int index]"
        );
    }

    #[test]
    fn test_explicit_operator_scenario() {
        let content = billing();
        let explicit = member_handle(&content, "Acme.Billing.Money", 0, "op_Explicit");

        assert_eq!(
            convert(ConversionFlags::SHOW_PARAMETER_LIST, explicit, &content),
            "explicit operator Money(decimal)"
        );
    }

    #[test]
    fn test_implicit_operator_starts_with_keyword() {
        let content = billing();
        let implicit = member_handle(&content, "Acme.Billing.Money", 0, "op_Implicit");
        let flags = ConversionFlags::STANDARD
            .without(ConversionFlags::SHOW_MODIFIERS)
            .without(ConversionFlags::SHOW_ACCESSIBILITY);

        let text = convert(flags, implicit, &content);
        assert_eq!(text, "implicit operator decimal(Money money)");
        // The target type is not repeated as a return type
        assert!(text.starts_with("implicit operator decimal("));
    }

    #[test]
    fn test_symbolic_and_unknown_operators() {
        let content = billing();
        let addition = member_handle(&content, "Acme.Billing.Money", 0, "op_Addition");
        let power = member_handle(&content, "Acme.Billing.Money", 0, "op_Power");

        assert_eq!(
            convert(ConversionFlags::STANDARD, addition, &content),
            "public static Money operator +(Money left, Money right)"
        );
        assert_eq!(
            convert(ConversionFlags::NONE, power, &content),
            "operator op_Power"
        );
    }

    #[test]
    fn test_constructor_and_destructor_names() {
        let content = billing();
        let constructor = member_handle(&content, "Acme.Billing.Money", 0, ".ctor");
        let destructor = member_handle(&content, "Acme.Billing.Ledger", 1, "Finalize");

        assert_eq!(convert(ConversionFlags::NONE, constructor, &content), "Money");
        assert_eq!(
            convert(ConversionFlags::STANDARD, constructor, &content),
            "public Money(decimal amount)"
        );
        assert_eq!(convert(ConversionFlags::NONE, destructor, &content), "~Ledger");
        assert_eq!(convert(ConversionFlags::ALL, destructor, &content), "Acme.Billing.Ledger<T>.~Ledger()");
    }

    #[test]
    fn test_properties_never_get_a_parameter_list() {
        let content = billing();
        let count = member_handle(&content, "Acme.Billing.Ledger", 1, "Count");

        assert_eq!(convert(ConversionFlags::STANDARD, count, &content), "public int Count");
    }

    #[test]
    fn test_type_parameter_list_only_for_methods() {
        let content = billing();
        let max = member_handle(&content, "Acme.Billing.Calculator", 0, "Max");
        let flags = ConversionFlags::SHOW_TYPE_PARAMETER_LIST | ConversionFlags::SHOW_PARAMETER_LIST;

        assert_eq!(convert(flags, max, &content), "Max<T>(T, T)");
        assert_eq!(
            convert(ConversionFlags::SHOW_PARAMETER_LIST, max, &content),
            "Max(T, T)"
        );
    }

    #[test]
    fn test_parameter_modifiers() {
        let content = billing();
        let sum = member_handle(&content, "Acme.Billing.Calculator", 0, "Sum");
        let try_parse = member_handle(&content, "Acme.Billing.Calculator", 0, "TryParse");

        assert_eq!(
            convert(ConversionFlags::STANDARD, sum, &content),
            "public static int Sum(params int[] values)"
        );
        assert_eq!(
            convert(ConversionFlags::SHOW_PARAMETER_LIST, try_parse, &content),
            "TryParse(string, out Money)"
        );
    }

    #[test]
    fn test_type_declaration_headers() {
        let content = billing();

        assert_eq!(
            convert(ConversionFlags::STANDARD, type_handle(&content, "Acme.Billing.Calculator", 0), &content),
            "public static class Calculator"
        );
        assert_eq!(
            convert(ConversionFlags::STANDARD, type_handle(&content, "Acme.Billing.IAccount", 1), &content),
            "public interface IAccount<out T>"
        );
        assert_eq!(
            convert(ConversionFlags::STANDARD, type_handle(&content, "Acme.Billing.Currency", 0), &content),
            "public enum Currency"
        );
        assert_eq!(
            convert(ConversionFlags::NONE, type_handle(&content, "Acme.Billing.Ledger", 1), &content),
            "Ledger"
        );
    }

    #[test]
    fn test_top_level_type_gets_namespace_when_fully_qualified() {
        let content = billing();
        let ledger = type_handle(&content, "Acme.Billing.Ledger", 1);

        assert_eq!(
            convert(ConversionFlags::ALL, ledger, &content),
            "public class Acme.Billing.Ledger<T>"
        );
    }

    #[test]
    fn test_nested_type_qualification_has_no_namespace() {
        let content = billing();
        let line = type_handle(&content, "Acme.Billing.Ledger+Entry+Line", 0);

        assert_eq!(
            convert(ConversionFlags::USE_FULLY_QUALIFIED_MEMBER_NAMES, line, &content),
            "Ledger.Entry.Line"
        );
        assert_eq!(convert(ConversionFlags::NONE, line, &content), "Ledger.Entry.Line");
    }

    #[test]
    fn test_nested_type_header_keeps_enclosing_type_parameters() {
        let content = billing();
        let entry = type_handle(&content, "Acme.Billing.Ledger+Entry", 0);
        let line = type_handle(&content, "Acme.Billing.Ledger+Entry+Line", 0);
        let total = member_handle(&content, "Acme.Billing.Ledger+Entry+Line", 0, "Total");

        assert_eq!(convert(ConversionFlags::STANDARD, entry, &content), "public sealed class Ledger<T>.Entry");
        assert_eq!(convert(ConversionFlags::ALL, line, &content), "public struct Ledger<T>.Entry.Line");

        // The header and the member qualification agree on the enclosing chain
        let flags = ConversionFlags::USE_FULLY_QUALIFIED_MEMBER_NAMES | ConversionFlags::SHOW_TYPE_PARAMETER_LIST;
        let header = convert(flags, line, &content);
        assert_eq!(convert(flags, total, &content), format!("{}.Total", header));
    }

    #[test]
    fn test_member_of_nested_type_qualifies_through_enclosing_types() {
        let content = billing();
        let total = member_handle(&content, "Acme.Billing.Ledger+Entry+Line", 0, "Total");
        let flags = ConversionFlags::USE_FULLY_QUALIFIED_MEMBER_NAMES | ConversionFlags::SHOW_RETURN_TYPE;

        assert_eq!(
            convert(flags, total, &content),
            "Money Ledger<T>.Entry.Line.Total"
        );
        assert_eq!(
            convert(flags | ConversionFlags::USE_FULLY_QUALIFIED_TYPE_NAMES, total, &content),
            "Acme.Billing.Money Acme.Billing.Ledger<T>.Entry.Line.Total"
        );
    }

    #[test]
    fn test_interface_members_hide_accessibility() {
        let content = billing();
        let balance = member_handle(&content, "Acme.Billing.IAccount", 1, "Balance");

        assert_eq!(convert(ConversionFlags::STANDARD, balance, &content), "decimal Balance");
    }

    #[test]
    fn test_accessibility_needs_modifiers_facet() {
        let content = billing();
        let count = member_handle(&content, "Acme.Billing.Ledger", 1, "Count");

        assert_eq!(convert(ConversionFlags::SHOW_ACCESSIBILITY, count, &content), "Count");
        assert_eq!(
            convert(ConversionFlags::SHOW_ACCESSIBILITY | ConversionFlags::SHOW_MODIFIERS, count, &content),
            "public Count"
        );
        let on_changed = member_handle(&content, "Acme.Billing.Ledger", 1, "OnChanged");
        assert_eq!(convert(ConversionFlags::SHOW_MODIFIERS, on_changed, &content), "virtual OnChanged");
    }

    #[test]
    fn test_no_modifier_tokens_without_modifiers_facet() {
        const FACETS: [ConversionFlags; 8] = [
            ConversionFlags::SHOW_PARAMETER_NAMES,
            ConversionFlags::SHOW_ACCESSIBILITY,
            ConversionFlags::USE_FULLY_QUALIFIED_TYPE_NAMES,
            ConversionFlags::USE_FULLY_QUALIFIED_MEMBER_NAMES,
            ConversionFlags::SHOW_RETURN_TYPE,
            ConversionFlags::SHOW_TYPE_PARAMETER_LIST,
            ConversionFlags::SHOW_PARAMETER_LIST,
            ConversionFlags::SHOW_DEFINITION_KEYWORD,
        ];
        let content = billing();
        let keywords: Vec<&str> = MODIFIER_ORDER.iter().map(|(_, token)| *token).collect();
        let entities = all_convertible_entities(&content);

        for mask in 0u32..(1 << FACETS.len()) {
            let flags = FACETS
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .fold(ConversionFlags::NONE, |flags, (_, facet)| flags | *facet);

            for entity in &entities {
                let text = convert(flags, *entity, &content);
                for word in text.split(|c: char| !c.is_alphanumeric()) {
                    assert!(!keywords.contains(&word), "{:?} leaked into {:?} under {}", word, text, flags);
                }
            }
        }
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let content = billing();
        let ambience = CSharpAmbience::new(ConversionFlags::ALL);

        for entity in all_convertible_entities(&content) {
            let first = ambience.convert_entity(entity, &content).unwrap();
            let second = ambience.convert_entity(entity, &content).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.trim_end(), first);
        }
    }

    #[test]
    fn test_concurrent_conversions_share_the_model() {
        let shared = SharedProjectContent::new(billing());
        let ambience = CSharpAmbience::new(ConversionFlags::STANDARD);
        let entities = {
            let guard = shared.synchronize();
            all_convertible_entities(&guard)
        };
        let expected: Vec<String> = entities
            .iter()
            .map(|e| ambience.convert_entity(*e, &shared).unwrap())
            .collect();

        thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        entities
                            .iter()
                            .map(|e| ambience.convert_entity(*e, &shared).unwrap())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_delegate_and_module_are_internal_inconsistencies() {
        let content = AssemblyParser::from_value(json!({
            "types": [
                { "namespace": "Acme", "name": "Handler", "kind": "delegate", "accessibility": "public" },
                { "namespace": "Acme", "name": "Legacy", "kind": "module", "accessibility": "public" }
            ]
        }))
        .unwrap();
        let ambience = CSharpAmbience::new(ConversionFlags::STANDARD);

        let handler = ambience.convert_entity(type_handle(&content, "Acme.Handler", 0), &content);
        assert!(matches!(handler, Err(AmbienceError::InternalInconsistency(_))));

        let legacy = type_handle(&content, "Acme.Legacy", 0);
        assert!(matches!(
            ambience.convert_entity(legacy, &content),
            Err(AmbienceError::InternalInconsistency(_))
        ));

        // Without the keyword the module kind is never inspected
        let no_keyword = CSharpAmbience::new(ConversionFlags::STANDARD.without(ConversionFlags::SHOW_DEFINITION_KEYWORD));
        assert_eq!(no_keyword.convert_entity(legacy, &content).unwrap(), "public Legacy");
    }

    #[test]
    fn test_foreign_handle_is_rejected() {
        let content = billing();
        let ambience = CSharpAmbience::new(ConversionFlags::STANDARD);

        let result = ambience.convert_entity(EntityHandle::Type(TypeId(999)), &content);
        assert!(matches!(result, Err(AmbienceError::InternalInconsistency(_))));

        let result = ambience.convert_entity(
            EntityHandle::Member(MemberId {
                declaring_type: TypeId(0),
                index: 999,
            }),
            &content,
        );
        assert!(matches!(result, Err(AmbienceError::InternalInconsistency(_))));
    }

    #[test]
    fn test_convert_variable() {
        let content = billing();
        let standard = CSharpAmbience::new(ConversionFlags::STANDARD);
        let list = TypeReference::generic(
            "System.Collections.Generic.List",
            vec![TypeReference::named("System.Int32")],
        );

        assert_eq!(
            standard.convert_variable(&Variable::local("items", list.clone()), &content),
            "List<int> items"
        );
        assert_eq!(
            CSharpAmbience::new(ConversionFlags::ALL).convert_variable(&Variable::local("items", list), &content),
            "System.Collections.Generic.List<int> items"
        );

        let max = Variable::constant("Max", TypeReference::named("System.Int32"), ConstantValue::Integer(10));
        assert_eq!(standard.convert_variable(&max, &content), "const int Max = 10");
        assert_eq!(
            CSharpAmbience::new(ConversionFlags::NONE).convert_variable(&max, &content),
            "int Max = 10"
        );
    }

    #[test]
    fn test_convert_parameter_variable() {
        let content = billing();
        let result = Variable::parameter(
            "result",
            TypeReference::named("Acme.Billing.Money"),
            ParameterModifier::Out,
        );

        assert_eq!(
            CSharpAmbience::new(ConversionFlags::STANDARD).convert_variable(&result, &content),
            "out Money result"
        );
        assert_eq!(
            CSharpAmbience::new(ConversionFlags::NONE).convert_variable(&result, &content),
            "out Money"
        );
    }

    #[test]
    fn test_convert_type_shapes() {
        let ambience = CSharpAmbience::new(ConversionFlags::STANDARD);
        let int = ResolvedType::builtin("Int32");

        assert_eq!(ambience.convert_type(&int), "int");
        assert_eq!(
            ambience.convert_type(&ResolvedType::Array {
                element: Box::new(int.clone()),
                rank: 2,
            }),
            "int[,]"
        );
        assert_eq!(
            ambience.convert_type(&ResolvedType::Array {
                element: Box::new(ResolvedType::Array {
                    element: Box::new(int.clone()),
                    rank: 1,
                }),
                rank: 1,
            }),
            "int[][]"
        );
        assert_eq!(ambience.convert_type(&ResolvedType::Pointer(Box::new(int))), "int*");
    }

    #[test]
    fn test_convert_type_reference_honors_short_names() {
        let content = SharedProjectContent::new(billing());
        let entry = TypeReference::named("Acme.Billing.Ledger+Entry");

        assert_eq!(
            CSharpAmbience::new(ConversionFlags::STANDARD).convert_type_reference(&entry, &content),
            "Ledger<T>.Entry"
        );
        assert_eq!(
            CSharpAmbience::new(ConversionFlags::USE_FULLY_QUALIFIED_TYPE_NAMES)
                .convert_type_reference(&entry, &content),
            "Acme.Billing.Ledger<T>.Entry"
        );
        assert_eq!(
            CSharpAmbience::new(ConversionFlags::STANDARD)
                .convert_type_reference(&TypeReference::named("Vendor.Widget"), &content),
            "Widget"
        );
    }

    #[test]
    fn test_wrappers() {
        let ambience = CSharpAmbience::default();

        assert_eq!(ambience.wrap_attribute("Obsolete"), "[Obsolete]");
        assert_eq!(ambience.wrap_comment("note"), "// note");
    }

    #[test]
    fn test_flags_can_be_swapped_through_the_trait() {
        let content = billing();
        let foo = member_handle(&content, "Acme.Billing.Calculator", 0, "Foo");
        let mut ambience = CSharpAmbience::default();

        assert_eq!(ambience.convert_entity(foo, &content).unwrap(), "Foo");
        ambience.set_conversion_flags(ConversionFlags::STANDARD);
        assert_eq!(ambience.conversion_flags(), ConversionFlags::STANDARD);
        assert_eq!(
            ambience.convert_entity(foo, &content).unwrap(),
            "public static int Foo(string bar, int baz)"
        );
    }
}

#[cfg(test)]
mod renderer_tests {
    use crate::model::{ConstantValue, ParameterModifier, Variance};
    use crate::renderer::*;
    use crate::syntax::*;

    #[test]
    fn test_formatting_options_apply() {
        let options = FormattingOptions {
            space_after_type_argument_comma: false,
            space_after_array_rank_comma: true,
            ..FormattingOptions::default()
        };
        let renderer = TextRenderer::new(options);
        let pair = AstType::Simple {
            identifier: "Pair".to_string(),
            type_arguments: vec![AstType::Primitive("int"), AstType::Primitive("string")],
        };
        let matrix = AstType::Array {
            element: Box::new(AstType::Primitive("double")),
            rank: 3,
        };

        assert_eq!(renderer.render(&pair), "Pair<int,string>");
        assert_eq!(renderer.render(&matrix), "double[, , ]");
    }

    #[test]
    fn test_parameter_rendering() {
        let renderer = TextRenderer::default();
        let named = ParameterDeclaration {
            modifier: Some(ParameterModifier::Ref),
            parameter_type: AstType::Primitive("int"),
            name: Some("count".to_string()),
        };
        let unnamed = ParameterDeclaration {
            modifier: Some(ParameterModifier::This),
            parameter_type: AstType::simple("Widget"),
            name: None,
        };

        assert_eq!(renderer.render(&named), "ref int count");
        assert_eq!(renderer.render(&unnamed), "this Widget");
        assert_eq!(renderer.render_list(&[named, unnamed]), "ref int count, this Widget");
    }

    #[test]
    fn test_type_parameter_list() {
        let renderer = TextRenderer::default();
        let type_parameters = vec![
            TypeParameterDeclaration {
                name: "TKey".to_string(),
                variance: Variance::Contravariant,
            },
            TypeParameterDeclaration {
                name: "TValue".to_string(),
                variance: Variance::Invariant,
            },
        ];

        assert_eq!(renderer.render_type_parameters(&type_parameters), "<in TKey, TValue>");
        assert_eq!(renderer.render_type_parameters(&[]), "");
    }

    #[test]
    fn test_variable_statement_keeps_terminator() {
        let statement = VariableDeclarationStatement {
            modifiers: Modifiers::CONST,
            variable_type: AstType::Primitive("char"),
            name: "Separator".to_string(),
            initializer: Some(ConstantValue::Char('\'')),
        };

        assert_eq!(TextRenderer::default().render(&statement), "const char Separator = '\\'';\n");
    }
}
