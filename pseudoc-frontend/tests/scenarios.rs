//! End-to-end lowering scenarios

use pretty_assertions::assert_eq;
use pseudoc_common::{CompileOptions, CompilerError, ScopeError};
use pseudoc_frontend::ir::{Instruction, Label, Segment};
use pseudoc_frontend::{Compiler, Frontend, TokenKind};
use std::collections::HashSet;

fn compile_one(source: &str) -> Segment {
    let mut segments = Frontend::compile_source(source).unwrap();
    assert_eq!(segments.len(), 1);
    segments.remove(0)
}

fn label_name(label: &Label) -> u32 {
    label.name().unwrap()
}

/// Jumps whose target label was already defined above them
fn backward_jumps(segment: &Segment) -> Vec<u32> {
    let mut defined = HashSet::new();
    let mut backward = Vec::new();
    for instruction in &segment.instructions {
        match instruction {
            Instruction::Label(label) => {
                defined.insert(label_name(label));
            }
            Instruction::Jump { target } if defined.contains(&label_name(target)) => {
                backward.push(label_name(target));
            }
            _ => {}
        }
    }
    backward
}

fn position(segment: &Segment, predicate: impl Fn(&Instruction) -> bool) -> usize {
    segment.instructions.iter().position(predicate).unwrap()
}

#[test]
fn test_integer_lexemes_round_trip() {
    let source = "0 7 42 2147483647 00012";
    let tokens = Frontend::tokenize_source(source);

    let lexemes: Vec<&str> = tokens
        .iter()
        .filter(|t| t.is(TokenKind::IntLiteral))
        .map(|t| t.lexeme.as_str())
        .collect();
    assert_eq!(lexemes, source.split(' ').collect::<Vec<_>>());
}

#[test]
fn test_scenario_a_parameter_add_return() {
    let mut compiler = Compiler::default();
    let segments = compiler.compile("int f(int a){ return a + 1; }").unwrap();
    let segment = &segments[0];

    assert_eq!(compiler.functions().lookup("f").unwrap().to_string(), "(i32)->i32");

    let begins = segment
        .instructions
        .iter()
        .filter(|i| matches!(i, Instruction::FunctionBegin { .. }))
        .count();
    assert_eq!(begins, 1);

    let alloca = position(segment, |i| matches!(i, Instruction::Alloca { .. }));
    let store = position(segment, |i| matches!(i, Instruction::Store { .. }));
    let load = position(segment, |i| matches!(i, Instruction::Load { .. }));
    let add = position(segment, |i| i.to_string().contains("= add i32") && i.to_string().ends_with(", 1"));
    let ret = position(segment, |i| matches!(i, Instruction::Return { value: Some(_) }));
    assert!(alloca < store && store < load && load < add && add < ret);
}

#[test]
fn test_scenario_b_if_without_else() {
    let segment = compile_one("int f(int a){ if (a) return 1; return 0; }");

    let returns = segment
        .instructions
        .iter()
        .filter(|i| matches!(i, Instruction::Return { .. }))
        .count();
    assert_eq!(returns, 2);

    let branches: Vec<(usize, &Instruction)> = segment
        .instructions
        .iter()
        .enumerate()
        .filter(|(_, i)| matches!(i, Instruction::Branch { .. }))
        .collect();
    assert_eq!(branches.len(), 1);

    let (at, branch) = branches[0];
    let Instruction::Branch { on_true, on_false, .. } = branch else {
        unreachable!()
    };
    for target in [on_true, on_false] {
        let defined = segment.instructions[at + 1..]
            .iter()
            .any(|i| matches!(i, Instruction::Label(label) if label == target));
        assert!(defined, "label {target} is not defined after the branch");
    }
}

#[test]
fn test_scenario_c_while_loop_shape() {
    let segment = compile_one("int f(){ int x = 0; while (x < 10) { x = x + 1; } return x; }");

    let branch = segment
        .instructions
        .iter()
        .find_map(|i| match i {
            Instruction::Branch { on_true, on_false, .. } => Some((label_name(on_true), label_name(on_false))),
            _ => None,
        })
        .unwrap();
    let (_, exit) = branch;

    let backward = backward_jumps(&segment);
    assert_eq!(backward.len(), 1);

    // the back edge goes to the label right before the condition
    let check = position(&segment, |i| matches!(i, Instruction::Label(l) if label_name(l) == backward[0]));
    assert!(matches!(segment.instructions[check + 1], Instruction::Load { .. }));

    let jumps_to_exit = segment
        .instructions
        .iter()
        .filter(|i| matches!(i, Instruction::Jump { target } if label_name(target) == exit))
        .count();
    assert_eq!(jumps_to_exit, 0);
}

#[test]
fn test_scenario_d_undeclared_function() {
    let err = Frontend::compile_source("int f(){ return g(); }").unwrap_err();
    assert_eq!(err, CompilerError::Scope(ScopeError::UndeclaredFunction { name: "g".to_string() }));

    // a failing definition fails the whole unit
    let err = Frontend::compile_source("int ok(){ return 1; } int f(){ return g(); }").unwrap_err();
    assert!(matches!(err, CompilerError::Scope(ScopeError::UndeclaredFunction { .. })));
}

#[test]
fn test_scenario_e_redeclaration() {
    let err = Frontend::compile_source("void f(){ int x; int x; }").unwrap_err();
    assert_eq!(err, CompilerError::Scope(ScopeError::Redeclared { name: "x".to_string() }));

    assert!(Frontend::compile_source("void f(){ { int x; } { int x; } }").is_ok());
}

#[test]
fn test_parameter_and_local_share_top_scope_rules() {
    let shadowed = Frontend::compile_source("void f(int a){ int a; }");
    assert!(shadowed.is_ok(), "the body is a child scope of the parameters");

    let err = Frontend::compile_source("void f(int a, int a){ }").unwrap_err();
    assert_eq!(err, CompilerError::Scope(ScopeError::Redeclared { name: "a".to_string() }));
}

#[test]
fn test_function_redefinition() {
    let err = Frontend::compile_source("void f(){ } void f(){ }").unwrap_err();
    assert_eq!(err, CompilerError::Scope(ScopeError::FunctionRedefined { name: "f".to_string() }));
}

#[test]
fn test_inner_declaration_shadows_outer() {
    let rendered = compile_one("int f(){ int x = 1; { int x = 2; return x; } }").render().unwrap();
    assert!(rendered.contains("%3 = load i32, ptr %2, align 4"), "{rendered}");
}

#[test]
fn test_inner_declaration_is_not_visible_after_block() {
    let err = Frontend::compile_source("int f(){ { int y = 1; } return y; }").unwrap_err();
    assert_eq!(err, CompilerError::Scope(ScopeError::UndeclaredVariable { name: "y".to_string() }));
}

#[test]
fn test_lowering_is_deterministic() {
    let source = "int f(int n){ int s = 0; for (int i = 0; i < n; i++) s += i; return n > 0 ? s : 0; }";
    let definitions = Frontend::parse_source(source).unwrap();

    let first = Compiler::default().lower_definition(&definitions[0]).unwrap();
    let second = Compiler::default().lower_definition(&definitions[0]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_increments_yield_old_and_new_values() {
    let expected = "\
define i32 @f(i32 %0) {
1:
  %2 = alloca i32, align 4
  store i32 %0, ptr %2, align 4
  %3 = alloca i32, align 4
  %4 = load i32, ptr %2, align 4
  %5 = add i32 %4, 1
  store i32 %5, ptr %2, align 4
  store i32 %4, ptr %3, align 4
  %6 = load i32, ptr %3, align 4
  %7 = load i32, ptr %2, align 4
  %8 = add i32 %7, 1
  store i32 %8, ptr %2, align 4
  %9 = add i32 %6, %8
  ret i32 %9
}";
    let segment = compile_one("int f(int a){ int b = a++; return b + ++a; }");
    assert_eq!(segment.render().unwrap(), expected);
}

#[test]
fn test_decrement_adds_negative_delta() {
    let rendered = compile_one("void f(int a){ a--; }").render().unwrap();
    assert!(rendered.contains("= add i32 %3, -1"), "{rendered}");
}

#[test]
fn test_chained_assignment_stores_twice() {
    let rendered = compile_one("int f(){ int x; int y; x = y = 3; return x; }").render().unwrap();
    assert!(rendered.contains("store i32 3, ptr %2, align 4"), "{rendered}");
    assert!(rendered.contains("store i32 3, ptr %1, align 4"), "{rendered}");
}

#[test]
fn test_logical_or_has_no_control_flow() {
    let segment = compile_one("int f(int a, int b){ return a || b; }");
    assert!(!segment
        .instructions
        .iter()
        .any(|i| matches!(i, Instruction::Branch { .. } | Instruction::Jump { .. })));
    assert!(segment.render().unwrap().contains("= or i1"));
}

#[test]
fn test_boolean_ternary_keeps_i1_phi() {
    let rendered = compile_one("int f(int a, int b){ return a ? a < b : b < a; }").render().unwrap();
    assert!(rendered.contains("phi i1"), "{rendered}");
    assert!(rendered.contains("zext i1"), "{rendered}");
}

#[test]
fn test_nested_loop_break_targets_inner_exit() {
    let source = "void f(){ while (1) { while (1) { break; } break; } }";
    let segment = compile_one(source);

    let exits: Vec<u32> = segment
        .instructions
        .iter()
        .filter_map(|i| match i {
            Instruction::Branch { on_false, .. } => Some(label_name(on_false)),
            _ => None,
        })
        .collect();
    let breaks: Vec<u32> = segment
        .instructions
        .iter()
        .filter_map(|i| match i {
            Instruction::Jump { target } if exits.contains(&label_name(target)) => Some(label_name(target)),
            _ => None,
        })
        .collect();

    // inner break first, then the outer one
    assert_eq!(breaks, vec![exits[1], exits[0]]);
}

#[test]
fn test_options_from_json_reach_lowering() {
    let options = CompileOptions::from_json(r#"{ "stack_alignment": 8 }"#).unwrap();
    let segments = Frontend::compile_source_with_options("void f(){ int x = 1; }", options).unwrap();
    assert!(segments[0].render().unwrap().contains("alloca i32, align 8"));
}

#[test]
fn test_segments_serialize_to_json() {
    let segment = compile_one("int f(int a){ return a > 1 ? a : 1; }");
    let json = serde_json::to_string(&segment).unwrap();
    assert!(json.contains("FunctionBegin"));

    let restored: Segment = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, segment);
}
