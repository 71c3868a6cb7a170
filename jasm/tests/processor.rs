use anyhow::Result;
use pretty_assertions::assert_eq;
use jasm::ast::Element;
use jasm::error::ErrorKind;
use jasm::modifiers::Modifier;
use jasm::operand::{BytecodeFormat, DefaultOperand, InstructionSet};
use jasm::processor::{AstProcessor, ProcessResult};

mod common;
use common::{array, body, code, decl, empty, holey_decl, insn, label, literal, object};

struct TestFormat {
	instructions: InstructionSet<DefaultOperand>,
}

impl TestFormat {
	fn new() -> TestFormat {
		let instructions = InstructionSet::new()
			.with("nop", &[])
			.with("return", &[])
			.with("bipush", &[DefaultOperand::Integer])
			.with("iload", &[DefaultOperand::Literal])
			.with("goto", &[DefaultOperand::Label])
			.with("ldc", &[DefaultOperand::String]);
		TestFormat { instructions }
	}
}

impl BytecodeFormat for TestFormat {
	type Operand = DefaultOperand;

	fn name(&self) -> &'static str {
		"test"
	}

	fn instructions(&self) -> &InstructionSet<DefaultOperand> {
		&self.instructions
	}
}

fn process(declarations: Vec<Element>) -> ProcessResult {
	let format = TestFormat::new();
	AstProcessor::new(&format).process(&declarations)
}

fn error_kinds(result: &ProcessResult) -> Vec<ErrorKind> {
	result.errors.iter().map(|error| error.kind.clone()).collect()
}

fn minimal_class() -> Element {
	decl(".class", vec![
		literal("public"),
		literal("super"),
		literal("Example"),
		body(vec![
			decl(".field", vec![literal("private"), literal("count"), literal("I")]),
			decl(".method", vec![
				literal("public"),
				literal("run"),
				literal("()V"),
				object(vec![
					("parameters", array(vec![literal("this")])),
					("code", code(vec![
						insn("nop", vec![]),
						label("end"),
						insn("return", vec![]),
					])),
				]),
			]),
		]),
	])
}

#[test]
fn minimal_class_resolves() -> Result<()> {
	let result = process(vec![minimal_class()]);

	assert_eq!(result.errors, vec![]);
	assert_eq!(result.warnings, vec![]);
	assert!(result.is_ok());

	let classes: Vec<_> = result.classes().collect();
	assert_eq!(classes.len(), 1);
	let class = classes[0];
	assert_eq!(class.name.text(), "Example");
	assert_eq!(class.modifiers.access_flags(), 0x0021);
	assert_eq!(class.fields.len(), 1);
	assert_eq!(class.methods.len(), 1);

	let field = &class.fields[0];
	assert_eq!(field.name.text(), "count");
	assert_eq!(field.descriptor.text(), "I");
	assert!(field.modifiers.contains(Modifier::Private));

	let method = &class.methods[0];
	assert_eq!(method.descriptor.text(), "()V");
	assert_eq!(method.parameters.len(), 1);
	assert_eq!(method.code.as_ref().map(|code| code.elements.len()), Some(3));
	Ok(())
}

#[test]
fn duplicate_signature_keeps_first() -> Result<()> {
	let result = process(vec![
		decl(".signature", vec![literal("LFirst;")]),
		decl(".signature", vec![literal("LSecond;")]),
		decl(".class", vec![literal("A"), body(vec![])]),
	]);

	assert_eq!(error_kinds(&result), vec![ErrorKind::DuplicateAttribute { attribute: "Signature" }]);
	let class = result.classes().next().ok_or_else(|| anyhow::anyhow!("no class"))?;
	assert_eq!(class.signature.as_ref().map(|x| x.text().into_owned()), Some("LFirst;".to_owned()));
	Ok(())
}

#[test]
fn duplicate_super_keeps_first() -> Result<()> {
	let result = process(vec![
		decl(".super", vec![literal("java/lang/Object")]),
		decl(".super", vec![literal("java/lang/Number")]),
		decl(".class", vec![literal("A"), body(vec![])]),
	]);

	assert_eq!(error_kinds(&result), vec![ErrorKind::DuplicateAttribute { attribute: "Super name" }]);
	let class = result.classes().next().ok_or_else(|| anyhow::anyhow!("no class"))?;
	assert_eq!(class.super_name.as_ref().map(|x| x.text().into_owned()), Some("java/lang/Object".to_owned()));
	Ok(())
}

#[test]
fn class_attributes_on_members_warn() {
	let result = process(vec![
		decl(".super", vec![literal("java/lang/Object")]),
		decl(".field", vec![literal("value"), literal("I")]),
		decl(".interface", vec![literal("java/lang/Runnable")]),
		decl(".method", vec![literal("run"), literal("()V"), empty()]),
	]);
	assert!(result.is_ok());
	assert_eq!(result.elements.len(), 2);

	let warnings: Vec<_> = result.warnings.iter().map(|warning| warning.message.clone()).collect();
	assert_eq!(warnings, vec![
		"Super name doesn't apply to a field",
		"Interface doesn't apply to a method",
	]);
}

#[test]
fn attributes_go_to_the_next_class() -> Result<()> {
	let result = process(vec![
		decl(".super", vec![literal("java/lang/Object")]),
		decl(".interface", vec![literal("java/lang/Runnable")]),
		decl(".interface", vec![literal("java/lang/Cloneable")]),
		decl(".annotation", vec![literal("LMarker;"), empty()]),
		decl(".class", vec![literal("A"), body(vec![])]),
		decl(".class", vec![literal("B"), body(vec![])]),
	]);
	assert!(result.is_ok());

	let classes: Vec<_> = result.classes().collect();
	assert_eq!(classes[0].super_name.as_ref().map(|x| x.text().into_owned()), Some("java/lang/Object".to_owned()));
	assert_eq!(classes[0].interfaces.len(), 2);
	assert_eq!(classes[0].annotations.len(), 1);

	assert_eq!(classes[1].super_name, None);
	assert_eq!(classes[1].interfaces.len(), 0);
	assert_eq!(classes[1].annotations.len(), 0);
	Ok(())
}

#[test]
fn members_have_their_own_attributes() -> Result<()> {
	let result = process(vec![
		decl(".signature", vec![literal("LOuter;")]),
		decl(".class", vec![literal("A"), body(vec![
			decl(".signature", vec![literal("TT;")]),
			decl(".field", vec![literal("value"), literal("Ljava/lang/Object;")]),
			decl(".method", vec![literal("get"), literal("()V"), empty()]),
		])]),
	]);
	assert!(result.is_ok());

	let class = result.classes().next().ok_or_else(|| anyhow::anyhow!("no class"))?;
	assert_eq!(class.signature.as_ref().map(|x| x.text().into_owned()), Some("LOuter;".to_owned()));
	assert_eq!(class.fields[0].signature.as_ref().map(|x| x.text().into_owned()), Some("TT;".to_owned()));
	assert_eq!(class.methods[0].signature, None);
	Ok(())
}

#[test]
fn dropped_declarations_still_take_attributes() {
	let result = process(vec![
		decl(".signature", vec![literal("LFirst;")]),
		// no name, so it's dropped
		decl(".field", vec![literal("I")]),
		decl(".signature", vec![literal("LSecond;")]),
		decl(".class", vec![literal("A"), body(vec![])]),
	]);

	assert_eq!(error_kinds(&result), vec![ErrorKind::MissingElement { expected: "field name and descriptor".to_owned() }]);
	let class = result.classes().next();
	assert_eq!(
		class.and_then(|class| class.signature.as_ref()).map(|x| x.text().into_owned()),
		Some("LSecond;".to_owned())
	);
}

#[test]
fn leftover_attributes_warn() {
	let result = process(vec![
		decl(".class", vec![literal("A"), body(vec![])]),
		decl(".signature", vec![literal("LLost;")]),
	]);

	assert!(result.is_ok());
	assert_eq!(result.warnings.len(), 1);
	assert_eq!(result.warnings[0].message, "Signature isn't followed by a declaration");
}

#[test]
fn one_unknown_instruction_among_five() {
	let result = process(vec![
		decl(".method", vec![literal("run"), literal("()V"), object(vec![
			("code", code(vec![
				insn("nop", vec![]),
				insn("bipush", vec![literal("1.5")]),
				insn("frobnicate", vec![literal("1")]),
				insn("iload", vec![literal("0")]),
				insn("return", vec![]),
			])),
		])]),
	]);

	let kinds = error_kinds(&result);
	assert_eq!(kinds.iter().filter(|kind| matches!(kind, ErrorKind::UnknownInstruction { .. })).count(), 1);
	assert_eq!(kinds, vec![
		ErrorKind::UnexpectedElement { expected: "integer".to_owned(), actual: jasm::ast::ElementKind::Number },
		ErrorKind::UnknownInstruction { mnemonic: "frobnicate".to_owned() },
	]);
	// the method itself is still resolved
	assert_eq!(result.elements.len(), 1);
}

#[test]
fn duplicate_labels() {
	let result = process(vec![
		decl(".method", vec![literal("run"), literal("()V"), object(vec![
			("code", code(vec![
				label("loop"),
				insn("goto", vec![literal("loop")]),
				label("loop"),
			])),
		])]),
	]);

	assert_eq!(error_kinds(&result), vec![ErrorKind::DuplicateLabel { label: "loop".to_owned() }]);
}

#[test]
fn invalid_modifiers_dont_stop_the_declaration() {
	let result = process(vec![
		decl(".class", vec![literal("static"), literal("public"), literal("bogus"), literal("A"), body(vec![])]),
	]);

	assert_eq!(error_kinds(&result), vec![
		ErrorKind::InvalidModifier { modifier: "static".to_owned(), target: jasm::modifiers::ModifierTarget::Class },
		ErrorKind::InvalidModifier { modifier: "bogus".to_owned(), target: jasm::modifiers::ModifierTarget::Class },
	]);
	let class = result.classes().next();
	assert_eq!(class.map(|class| class.modifiers.access_flags()), Some(0x0001));
}

#[test]
fn repeated_modifiers_warn() {
	let result = process(vec![
		decl(".field", vec![literal("final"), literal("final"), literal("x"), literal("J")]),
	]);

	assert!(result.is_ok());
	assert_eq!(result.warnings.len(), 1);
}

#[test]
fn field_values() {
	let result = process(vec![
		decl(".field", vec![literal("a"), literal("I"), literal("10")]),
		decl(".field", vec![literal("b"), literal("Ljava/lang/String;"), object(vec![("value", literal("\"text\""))])]),
		decl(".field", vec![literal("c"), literal("I"), object(vec![("value", literal("1")), ("other", literal("2"))])]),
		decl(".field", vec![literal("d"), literal("I"), object(vec![("value", literal("LFoo;"))])]),
	]);

	assert_eq!(error_kinds(&result), vec![
		ErrorKind::KeyMismatch { expected: "value".to_owned(), context: "field value".to_owned() },
		ErrorKind::UnexpectedElement { expected: "field value".to_owned(), actual: jasm::ast::ElementKind::Identifier },
	]);

	let fields: Vec<_> = result.elements.iter()
		.filter_map(|element| match element {
			Element::Field(field) => Some(field),
			_ => None,
		})
		.collect();
	assert_eq!(fields.len(), 2);
	assert!(matches!(fields[0].value, Some(Element::Number(_))));
	assert!(matches!(fields[1].value, Some(Element::String(_))));
}

#[test]
fn numbers_are_names() -> Result<()> {
	let result = process(vec![
		decl(".method", vec![literal("1"), literal("()V"), empty()]),
	]);
	assert!(result.is_ok());

	let Some(Element::Method(method)) = result.elements.first() else {
		anyhow::bail!("expected a method");
	};
	assert_eq!(method.name.token.kind, jasm::token::TokenKind::Identifier);
	Ok(())
}

#[test]
fn annotation_values() -> Result<()> {
	let result = process(vec![
		decl(".annotation", vec![literal("LExample;"), object(vec![
			("number", literal("1")),
			("flag", literal("true")),
			("type", literal("Ljava/lang/String;")),
			("none", empty()),
			("nested", decl(".annotation", vec![literal("LInner;"), empty()])),
			("constant", decl(".enum", vec![literal("LColor;"), literal("RED")])),
			("wrapped", body(vec![literal("\"x\"")])),
			("list", array(vec![literal("false"), literal("2")])),
		])]),
		decl(".class", vec![literal("A"), body(vec![])]),
	]);

	assert_eq!(result.errors, vec![]);
	let class = result.classes().next().ok_or_else(|| anyhow::anyhow!("no class"))?;
	let annotation = &class.annotations[0];
	assert_eq!(annotation.values.len(), 8);

	assert!(matches!(annotation.get("flag"), Some(Element::Bool(x)) if x.value));
	assert!(matches!(annotation.get("type"), Some(Element::Identifier(_))));
	assert!(matches!(annotation.get("none"), Some(Element::Array(x)) if x.is_empty()));
	assert!(matches!(annotation.get("nested"), Some(Element::Annotation(_))));
	assert!(matches!(annotation.get("constant"), Some(Element::Enum(_))));
	assert!(matches!(annotation.get("wrapped"), Some(Element::Array(x)) if x.len() == 1));
	assert!(matches!(annotation.get("list"), Some(Element::Array(x)) if matches!(x.get(0), Some(Element::Bool(_)))));
	Ok(())
}

#[test]
fn invalid_annotation_values() {
	let result = process(vec![
		decl(".annotation", vec![literal("LExample;"), object(vec![
			("name", literal("plain")),
			("declaration", decl(".field", vec![literal("a"), literal("I")])),
			("code", code(vec![])),
		])]),
		decl(".class", vec![literal("A"), body(vec![])]),
	]);

	assert_eq!(error_kinds(&result), vec![
		ErrorKind::UnexpectedElement { expected: "class type or boolean".to_owned(), actual: jasm::ast::ElementKind::Identifier },
		ErrorKind::UnexpectedDeclaration { keyword: "field".to_owned(), context: "annotation value" },
		ErrorKind::UnexpectedElement { expected: "annotation value".to_owned(), actual: jasm::ast::ElementKind::Code },
	]);
	// the annotation is kept with the valid values
	assert_eq!(result.classes().next().map(|class| class.annotations.len()), Some(1));
}

#[test]
fn sequence_errors() {
	let result = process(vec![
		literal("stray"),
		decl(".frob", vec![]),
		decl(".enum", vec![literal("LColor;"), literal("RED")]),
		decl(".class", vec![literal("A"), body(vec![decl(".class", vec![literal("B"), body(vec![])])])]),
	]);

	assert_eq!(error_kinds(&result), vec![
		ErrorKind::UnexpectedElement { expected: "declaration".to_owned(), actual: jasm::ast::ElementKind::Identifier },
		ErrorKind::UnknownDeclarationKeyword { keyword: ".frob".to_owned() },
		ErrorKind::UnexpectedDeclaration { keyword: "enum".to_owned(), context: "top level" },
		ErrorKind::UnexpectedDeclaration { keyword: "class".to_owned(), context: "class body" },
	]);
	assert_eq!(result.classes().count(), 1);
}

#[test]
fn holes_are_reported() {
	let result = process(vec![
		holey_decl(".class", vec![None, Some(literal("A")), Some(body(vec![]))]),
		decl(".method", vec![literal("run"), literal("()V"), object(vec![
			("parameters", array(vec![literal("a"), literal("1")])),
		])]),
	]);

	assert_eq!(error_kinds(&result), vec![
		ErrorKind::MissingElement { expected: "class modifier".to_owned() },
		ErrorKind::UnexpectedElement { expected: "identifier".to_owned(), actual: jasm::ast::ElementKind::Number },
	]);
}

#[test]
fn processing_twice_gives_the_same_result() {
	let format = TestFormat::new();
	let processor = AstProcessor::new(&format);
	let declarations = vec![minimal_class()];

	assert_eq!(processor.process(&declarations), processor.process(&declarations));
}
