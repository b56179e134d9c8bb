//! Unit tests for the IR module

use super::*;
use pretty_assertions::assert_eq;
use pseudoc_common::{AtomicType, LoweringError};

fn temp(id: u32, ty: AtomicType) -> Value {
    Value::Temp { id, ty }
}

#[test]
fn test_value_display() {
    assert_eq!(temp(5, AtomicType::I32).to_string(), "%5");
    assert_eq!(Value::Slot { id: 2, ty: AtomicType::I8 }.to_string(), "%2");
    assert_eq!(Value::int(-1, AtomicType::I32).to_string(), "-1");
    assert_eq!(Value::Float { value: 1.5, ty: AtomicType::Double }.to_string(), "1.500000e0");
}

#[test]
fn test_binary_rejects_mismatched_operands() {
    let err = Instruction::binary(
        temp(3, AtomicType::I32),
        IrBinaryOp::Add,
        temp(1, AtomicType::I32),
        temp(2, AtomicType::I64),
    )
    .unwrap_err();
    assert_eq!(err, LoweringError::type_mismatch(AtomicType::I32, AtomicType::I64, "add"));

    let err = Instruction::binary(
        temp(3, AtomicType::Float),
        IrBinaryOp::Mul,
        temp(1, AtomicType::Float),
        temp(2, AtomicType::Float),
    )
    .unwrap_err();
    assert!(matches!(err, LoweringError::UnsupportedType { ty: AtomicType::Float, .. }));
}

#[test]
fn test_icmp_and_branch_require_i1() {
    assert!(Instruction::icmp(
        temp(2, AtomicType::I32),
        Relation::Slt,
        temp(0, AtomicType::I32),
        Value::int(1, AtomicType::I32),
    )
    .is_err());

    let mut labels = LabelTable::new();
    let t = labels.allocate();
    let f = labels.allocate();
    assert!(Instruction::branch(temp(0, AtomicType::I32), t, f).is_err());
    assert!(Instruction::branch(temp(0, AtomicType::Bool), t, f).is_ok());
}

#[test]
fn test_store_checks_slot_type() {
    let slot = Value::Slot { id: 1, ty: AtomicType::I16 };
    assert!(Instruction::store(Value::int(3, AtomicType::I16), slot, 2).is_ok());
    assert!(Instruction::store(Value::int(3, AtomicType::I32), slot, 2).is_err());
    assert!(Instruction::store(Value::int(3, AtomicType::I32), temp(1, AtomicType::I32), 4).is_err());
    assert!(Instruction::alloca(Value::Slot { id: 1, ty: AtomicType::Void }, 1).is_err());
}

#[test]
fn test_phi_needs_two_incoming_edges() {
    let mut labels = LabelTable::new();
    let first = labels.allocate();
    let only = labels.fix(first, 1).unwrap();

    let err = Instruction::phi(temp(4, AtomicType::I32), vec![(Value::int(1, AtomicType::I32), only)]).unwrap_err();
    assert_eq!(err, LoweringError::IncompletePhi { incoming: 1 });

    let second = labels.allocate();
    let other = labels.fix(second, 2).unwrap();
    let phi = Instruction::phi(
        temp(4, AtomicType::I32),
        vec![(Value::int(1, AtomicType::I32), only), (temp(3, AtomicType::I32), other)],
    )
    .unwrap();
    assert_eq!(phi.to_string(), "%4 = phi i32 [ 1, %1 ], [ %3, %2 ]");
}

#[test]
fn test_zext_only_widens() {
    assert!(Instruction::zext(temp(1, AtomicType::I32), temp(0, AtomicType::Bool)).is_ok());
    assert!(Instruction::zext(temp(1, AtomicType::I8), temp(0, AtomicType::I32)).is_err());
    assert!(Instruction::zext(temp(1, AtomicType::I32), temp(0, AtomicType::I32)).is_err());
}

#[test]
fn test_call_result_matches_return_type() {
    assert!(Instruction::call(None, "g", AtomicType::Void, vec![]).is_ok());
    assert!(Instruction::call(None, "g", AtomicType::I32, vec![]).is_err());

    let call = Instruction::call(
        Some(temp(3, AtomicType::I32)),
        "add",
        AtomicType::I32,
        vec![temp(1, AtomicType::I32), Value::int(2, AtomicType::I32)],
    )
    .unwrap();
    assert_eq!(call.to_string(), "%3 = call i32 @add(i32 %1, i32 2)");
}

#[test]
fn test_label_fixed_exactly_once() {
    let mut labels = LabelTable::new();
    let label = labels.allocate();

    assert_eq!(label.name(), Err(LoweringError::UnfixedLabel { label: 0 }));
    assert_eq!(labels.check_all_fixed(), Err(LoweringError::UnfixedLabel { label: 0 }));

    let fixed = labels.fix(label, 7).unwrap();
    assert_eq!(fixed.name(), Ok(7));
    assert_eq!(labels.resolve(label), Ok(fixed));
    assert_eq!(labels.check_all_fixed(), Ok(()));

    assert_eq!(labels.fix(label, 8), Err(LoweringError::LabelRefixed { label: 0 }));
    assert_eq!(labels.fix(fixed, 8), Err(LoweringError::LabelRefixed { label: 0 }));
}

#[test]
fn test_label_from_another_table_is_unknown() {
    let mut other = LabelTable::new();
    other.allocate();
    let foreign = other.allocate();

    let mut labels = LabelTable::new();
    assert_eq!(labels.fix(foreign, 1), Err(LoweringError::UnknownLabel { label: 1 }));
    assert_eq!(labels.resolve(foreign), Err(LoweringError::UnknownLabel { label: 1 }));
}

#[test]
fn test_display_shows_pending_labels_but_render_rejects_them() {
    let mut labels = LabelTable::new();
    let target = labels.allocate();
    let jump = Instruction::jump(target);

    assert_eq!(target.to_string(), "<pending 0>");
    assert_eq!(jump.to_string(), "br label %<pending 0>");

    let mut segment = Segment::new();
    segment.push(jump);
    assert_eq!(segment.render(), Err(LoweringError::UnfixedLabel { label: 0 }));
}

#[test]
fn test_resolve_segment_rewrites_pending_operands() {
    let mut labels = LabelTable::new();
    let target = labels.allocate();

    let mut segment = Segment::new();
    segment.push(Instruction::jump(target));
    assert_eq!(segment.render(), Err(LoweringError::UnfixedLabel { label: 0 }));

    let fixed = labels.fix(target, 3).unwrap();
    segment.push(Instruction::Label(fixed));
    labels.resolve_segment(&mut segment).unwrap();

    assert_eq!(segment.instructions[0], Instruction::Jump { target: fixed });
    assert_eq!(segment.render().unwrap(), "  br label %3\n3:");
}

#[test]
fn test_segment_append_and_terminators() {
    let mut segment = Segment::new();
    let inner = Segment::from_value(Value::int(1, AtomicType::I32));
    assert_eq!(segment.append(inner), Some(Value::int(1, AtomicType::I32)));
    assert!(segment.is_empty());

    let err = segment.append_value(Segment::new(), "argument").unwrap_err();
    assert_eq!(err, LoweringError::VoidValue { context: "argument".to_string() });

    segment.push(Instruction::ret(None));
    assert!(segment.ends_with_terminator());
    assert_eq!(segment.len(), 1);
}
