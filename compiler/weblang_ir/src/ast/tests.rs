use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_equality_ignores_positions() {
    let a = Expr::new(ExprKind::Number(1.0), Position::new(1, 1));
    let b = Expr::new(ExprKind::Number(1.0), Position::new(7, 3));
    assert_eq!(a, b);
    assert_ne!(a, Expr::synthetic(ExprKind::Number(2.0)));
}

#[test]
fn test_nested_equality_ignores_positions() {
    let body = |pos| Expr::new(ExprKind::Var("n".into()), pos);
    let make = |pos| {
        Expr::new(
            ExprKind::Lambda(Rc::new(LambdaDef {
                name: Some("id".into()),
                params: vec!["n".into()],
                body: body(pos),
            })),
            pos,
        )
    };
    assert_eq!(make(Position::new(1, 1)), make(Position::new(4, 2)));
}

#[test]
fn test_symbol_table_agrees() {
    let all = [
        BinaryOp::Or,
        BinaryOp::And,
        BinaryOp::Lt,
        BinaryOp::Gt,
        BinaryOp::LtEq,
        BinaryOp::GtEq,
        BinaryOp::Eq,
        BinaryOp::NotEq,
        BinaryOp::StrictEq,
        BinaryOp::StrictNotEq,
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
    ];
    for op in all {
        assert_eq!(BinaryOp::from_symbol(op.as_symbol()), Some(op));
    }
}

#[test]
fn test_precedence_table() {
    let prec = |s: &str| BinaryOp::from_symbol(s).map(BinaryOp::precedence);
    assert_eq!(ASSIGN_PRECEDENCE, 1);
    assert_eq!(prec("||"), Some(2));
    assert_eq!(prec("&&"), Some(3));
    assert_eq!(prec("!=="), Some(7));
    assert_eq!(prec("<="), Some(7));
    assert_eq!(prec("-"), Some(10));
    assert_eq!(prec("%"), Some(20));
    assert_eq!(prec("="), None);
    assert_eq!(prec("&"), None);
    assert_eq!(prec("!"), None);
}

#[test]
fn test_operator_classes() {
    assert!(BinaryOp::Mod.is_arithmetic());
    assert!(!BinaryOp::Lt.is_arithmetic());
    assert!(BinaryOp::GtEq.is_ordering());
    assert!(!BinaryOp::Eq.is_ordering());
}

#[test]
fn test_deep_tree_drops() {
    let mut expr = Expr::synthetic(ExprKind::Number(1.0));
    for _ in 0..200_000 {
        expr = Expr::synthetic(ExprKind::Binary {
            op: BinaryOp::Add,
            left: Box::new(expr),
            right: Box::new(Expr::synthetic(ExprKind::Number(1.0))),
        });
    }
    drop(expr);
}

#[test]
fn test_into_kind_keeps_children() {
    let expr = Expr::synthetic(ExprKind::Array(vec![Expr::synthetic(ExprKind::Bool(true))]));
    assert_eq!(
        expr.into_kind(),
        ExprKind::Array(vec![Expr::synthetic(ExprKind::Bool(true))])
    );
}
