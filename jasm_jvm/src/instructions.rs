//! The JVM instructions, under their assembly mnemonics.
//!
//! Field and method instructions take the owner and name as one `Owner.name` identifier, followed by the
//! descriptor. The `interface` suffix on `invokespecial` and `invokestatic` marks a method of an interface.
//!
//! Only the general forms exist: `ldc`, `goto` and `jsr` stand for their wide forms as well, and there are no
//! `iload_0` style shortcuts or `wide` prefix, since an emitter picks those by itself.

use jasm::operand::{DefaultOperand, InstructionSet};
use log::debug;
use crate::operands::JvmOperand;

const IDENTIFIER: JvmOperand = JvmOperand::Default(DefaultOperand::Identifier);
const INTEGER: JvmOperand = JvmOperand::Default(DefaultOperand::Integer);
const LABEL: JvmOperand = JvmOperand::Default(DefaultOperand::Label);
const LITERAL: JvmOperand = JvmOperand::Default(DefaultOperand::Literal);

const NO_OPERANDS: &[&str] = &[
	"nop", "aconst_null",
	"iconst_m1", "iconst_0", "iconst_1", "iconst_2", "iconst_3", "iconst_4", "iconst_5",
	"lconst_0", "lconst_1",
	"fconst_0", "fconst_1", "fconst_2",
	"dconst_0", "dconst_1",
	"iaload", "laload", "faload", "daload", "aaload", "baload", "caload", "saload",
	"iastore", "lastore", "fastore", "dastore", "aastore", "bastore", "castore", "sastore",
	"pop", "pop2", "dup", "dup_x1", "dup_x2", "dup2", "dup2_x1", "dup2_x2", "swap",
	"iadd", "ladd", "fadd", "dadd",
	"isub", "lsub", "fsub", "dsub",
	"imul", "lmul", "fmul", "dmul",
	"idiv", "ldiv", "fdiv", "ddiv",
	"irem", "lrem", "frem", "drem",
	"ineg", "lneg", "fneg", "dneg",
	"ishl", "lshl", "ishr", "lshr", "iushr", "lushr",
	"iand", "land", "ior", "lor", "ixor", "lxor",
	"i2l", "i2f", "i2d", "l2i", "l2f", "l2d", "f2i", "f2l", "f2d", "d2i", "d2l", "d2f", "i2b", "i2c", "i2s",
	"lcmp", "fcmpl", "fcmpg", "dcmpl", "dcmpg",
	"ireturn", "lreturn", "freturn", "dreturn", "areturn", "return",
	"arraylength", "athrow", "monitorenter", "monitorexit",
];

const VARIABLES: &[&str] = &[
	"iload", "lload", "fload", "dload", "aload",
	"istore", "lstore", "fstore", "dstore", "astore",
	"ret",
];

const JUMPS: &[&str] = &[
	"ifeq", "ifne", "iflt", "ifge", "ifgt", "ifle",
	"if_icmpeq", "if_icmpne", "if_icmplt", "if_icmpge", "if_icmpgt", "if_icmple",
	"if_acmpeq", "if_acmpne",
	"goto", "jsr",
	"ifnull", "ifnonnull",
];

const MEMBERS: &[&str] = &[
	"getstatic", "putstatic", "getfield", "putfield",
	"invokevirtual", "invokespecial", "invokestatic", "invokeinterface",
	"invokespecialinterface", "invokestaticinterface",
];

const TYPES: &[&str] = &["new", "anewarray", "checkcast", "instanceof"];

/// Builds the instruction set of the JVM, covering every opcode.
pub fn jvm_instructions() -> InstructionSet<JvmOperand> {
	let mut instructions = InstructionSet::new();

	for &mnemonic in NO_OPERANDS {
		instructions.register(mnemonic, &[]);
	}
	for &mnemonic in VARIABLES {
		instructions.register(mnemonic, &[LITERAL]);
	}
	for &mnemonic in JUMPS {
		instructions.register(mnemonic, &[LABEL]);
	}
	for &mnemonic in MEMBERS {
		instructions.register(mnemonic, &[IDENTIFIER, IDENTIFIER]);
	}
	for &mnemonic in TYPES {
		instructions.register(mnemonic, &[JvmOperand::Type]);
	}

	let instructions = instructions
		.with("bipush", &[INTEGER])
		.with("sipush", &[INTEGER])
		.with("ldc", &[JvmOperand::Constant])
		.with("ldc2_w", &[JvmOperand::Constant])
		.with("iinc", &[LITERAL, INTEGER])
		.with("tableswitch", &[JvmOperand::TableSwitch])
		.with("lookupswitch", &[JvmOperand::LookupSwitch])
		.with("invokedynamic", &[IDENTIFIER, IDENTIFIER, JvmOperand::Handle, JvmOperand::Args])
		.with("newarray", &[JvmOperand::NewArrayType])
		.with("multianewarray", &[JvmOperand::Type, INTEGER]);

	debug!("registered {} jvm instructions", instructions.len());
	instructions
}
