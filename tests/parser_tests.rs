use brackish::ast::expression::{BinOpKind, Expression, FunctionBody, UnaryOpKind};
use brackish::ast::statement::Statement;
use brackish::ast::types::TypeAnnotation;
use brackish::lexer::Token;
use brackish::parser::{parse, ParseError};

fn parse_file(input: &str) -> brackish::ParsedFile {
    let tokens = Token::lex(input).expect("lexing failed");
    let (file, errors) = parse(tokens);
    assert!(errors.is_empty(), "expected no diagnostics, got: {errors:?}");
    file
}

fn parse_with_errors(input: &str) -> (brackish::ParsedFile, Vec<ParseError>) {
    let tokens = Token::lex(input).expect("lexing failed");
    parse(tokens)
}

#[test]
fn parse_print_addition() {
    let file = parse_file("print 1 + 2;");
    assert_eq!(file.statements.len(), 1);

    let Statement::Print(print) = &file.statements[0] else {
        panic!("expected print statement");
    };
    let Expression::BinaryOp(binop) = print.value.as_ref() else {
        panic!("expected binary op");
    };
    assert_eq!(binop.op, BinOpKind::Add);
    assert!(matches!(binop.left.as_ref(), Expression::Integer(i) if i.value == 1));
    assert!(matches!(binop.right.as_ref(), Expression::Integer(i) if i.value == 2));
}

#[test]
fn parse_function_literal_binding_and_call() {
    let file = parse_file("let foo = []: Int -> 5; print foo[];");
    assert_eq!(file.statements.len(), 2);

    let Statement::Let(decl) = &file.statements[0] else {
        panic!("expected let declaration");
    };
    assert_eq!(decl.name.value, "foo");
    let Expression::FunctionLiteral(literal) = decl.value.as_ref() else {
        panic!("expected function literal");
    };
    assert!(literal.params.is_empty());
    assert!(matches!(&literal.ret, TypeAnnotation::Named(named) if named.name == "Int"));
    let FunctionBody::Expression(body) = &literal.body else {
        panic!("expected expression body");
    };
    assert!(matches!(body.as_ref(), Expression::Integer(i) if i.value == 5));

    let Statement::Print(print) = &file.statements[1] else {
        panic!("expected print statement");
    };
    let Expression::FunctionCall(call) = print.value.as_ref() else {
        panic!("expected function call");
    };
    assert!(matches!(call.func.as_ref(), Expression::Ident(id) if id.value == "foo"));
    assert!(call.args.is_empty());
}

#[test]
fn parse_function_literal_params_and_body_precedence() {
    let file = parse_file("let foo = [x: Int, y: Int]: Int -> x - y * z;");

    let Statement::Let(decl) = &file.statements[0] else {
        panic!("expected let declaration");
    };
    let Expression::FunctionLiteral(literal) = decl.value.as_ref() else {
        panic!("expected function literal");
    };
    assert_eq!(literal.params.len(), 2);
    assert_eq!(literal.params[0].name.value, "x");
    assert_eq!(literal.params[1].name.value, "y");

    // x - y * z parses as x - (y * z)
    let FunctionBody::Expression(body) = &literal.body else {
        panic!("expected expression body");
    };
    let Expression::BinaryOp(outer) = body.as_ref() else {
        panic!("expected binary op body");
    };
    assert_eq!(outer.op, BinOpKind::Sub);
    assert!(matches!(outer.left.as_ref(), Expression::Ident(id) if id.value == "x"));
    let Expression::BinaryOp(inner) = outer.right.as_ref() else {
        panic!("expected nested binary op");
    };
    assert_eq!(inner.op, BinOpKind::Mul);
}

#[test]
fn missing_final_semicolon_is_one_diagnostic() {
    let (file, errors) = parse_with_errors("print 1");
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ParseError::ExpectedSemicolon { .. }));
    // the statement is still delivered best-effort
    assert_eq!(file.statements.len(), 1);
    assert!(matches!(file.statements[0], Statement::Print(_)));
}

#[test]
fn let_without_name_is_malformed() {
    let (file, errors) = parse_with_errors("let = 3;");
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ParseError::MalformedLetDeclaration { .. }));
    assert!(file.statements.is_empty());
}

#[test]
fn dangling_operator_in_parens() {
    let (file, errors) = parse_with_errors("print (1 + );");
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        ParseError::ExpectedExpressionInParens { .. }
    ));
    assert!(file.statements.is_empty());
}

#[test]
fn top_level_block_opens_a_nested_scope() {
    let file = parse_file("{ let x = 1; print x; }");
    assert_eq!(file.statements.len(), 1);

    let Statement::Block(block) = &file.statements[0] else {
        panic!("expected block statement");
    };
    assert_eq!(block.statements.len(), 2);
    assert!(matches!(block.statements[0], Statement::Let(_)));
    assert!(matches!(block.statements[1], Statement::Print(_)));
}

#[test]
fn parse_proceeds_past_unclosed_bracket() {
    let (file, errors) = parse_with_errors("((1 + 2)");
    assert!(matches!(errors[0], ParseError::UnclosedBracket { .. }));
    assert!(errors
        .iter()
        .any(|err| matches!(err, ParseError::ExpectedSemicolon { .. })));

    // the synthesized structure still parses as an expression statement
    assert_eq!(file.statements.len(), 1);
    let Statement::Expression(Expression::BinaryOp(binop)) = &file.statements[0] else {
        panic!("expected expression statement");
    };
    assert_eq!(binop.op, BinOpKind::Add);
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let file = parse_file("print 1 + 2 * 3; print 1 * 2 + 3;");

    let Statement::Print(first) = &file.statements[0] else {
        panic!("expected print statement");
    };
    let Expression::BinaryOp(binop) = first.value.as_ref() else {
        panic!("expected binary op");
    };
    assert_eq!(binop.op, BinOpKind::Add);
    assert!(matches!(binop.right.as_ref(), Expression::BinaryOp(b) if b.op == BinOpKind::Mul));

    let Statement::Print(second) = &file.statements[1] else {
        panic!("expected print statement");
    };
    let Expression::BinaryOp(binop) = second.value.as_ref() else {
        panic!("expected binary op");
    };
    assert_eq!(binop.op, BinOpKind::Add);
    assert!(matches!(binop.left.as_ref(), Expression::BinaryOp(b) if b.op == BinOpKind::Mul));
}

#[test]
fn logical_operators_fold_left() {
    // a and b or c parses as (a and b) or c
    let file = parse_file("print a and b or c;");

    let Statement::Print(print) = &file.statements[0] else {
        panic!("expected print statement");
    };
    let Expression::BinaryOp(binop) = print.value.as_ref() else {
        panic!("expected binary op");
    };
    assert_eq!(binop.op, BinOpKind::Or);
    assert!(matches!(binop.left.as_ref(), Expression::BinaryOp(b) if b.op == BinOpKind::And));
}

#[test]
fn unary_operators_nest_rightward() {
    // -!x parses as -(!x)
    let file = parse_file("print -!x;");

    let Statement::Print(print) = &file.statements[0] else {
        panic!("expected print statement");
    };
    let Expression::UnaryOp(outer) = print.value.as_ref() else {
        panic!("expected unary op");
    };
    assert_eq!(outer.op, UnaryOpKind::Neg);
    let Expression::UnaryOp(inner) = outer.operand.as_ref() else {
        panic!("expected nested unary op");
    };
    assert_eq!(inner.op, UnaryOpKind::Not);
    assert!(matches!(inner.operand.as_ref(), Expression::Ident(_)));
}

#[test]
fn equality_is_non_associative() {
    let (_, errors) = parse_with_errors("print 1 == 2 == 3;");
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ParseError::InvalidPrintExpression { .. }));
}

#[test]
fn comparison_is_non_associative() {
    let (_, errors) = parse_with_errors("print 1 < 2 < 3;");
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ParseError::InvalidPrintExpression { .. }));
}

#[test]
fn parenthesization_changes_only_the_range() {
    let plain = parse_file("print 1 + 2;");
    let wrapped = parse_file("print (1 + 2);");

    for file in [&plain, &wrapped] {
        let Statement::Print(print) = &file.statements[0] else {
            panic!("expected print statement");
        };
        let Expression::BinaryOp(binop) = print.value.as_ref() else {
            panic!("expected binary op");
        };
        assert_eq!(binop.op, BinOpKind::Add);
        assert!(matches!(binop.left.as_ref(), Expression::Integer(i) if i.value == 1));
        assert!(matches!(binop.right.as_ref(), Expression::Integer(i) if i.value == 2));
    }
}

#[test]
fn calls_chain_left_to_right() {
    let file = parse_file("print f[1][2];");

    let Statement::Print(print) = &file.statements[0] else {
        panic!("expected print statement");
    };
    let Expression::FunctionCall(outer) = print.value.as_ref() else {
        panic!("expected function call");
    };
    assert_eq!(outer.args.len(), 1);
    let Expression::FunctionCall(inner) = outer.func.as_ref() else {
        panic!("expected nested call");
    };
    assert!(matches!(inner.func.as_ref(), Expression::Ident(id) if id.value == "f"));
}

#[test]
fn calls_bind_tighter_than_operators() {
    let file = parse_file("print f[1] + 2;");

    let Statement::Print(print) = &file.statements[0] else {
        panic!("expected print statement");
    };
    let Expression::BinaryOp(binop) = print.value.as_ref() else {
        panic!("expected binary op");
    };
    assert_eq!(binop.op, BinOpKind::Add);
    assert!(matches!(binop.left.as_ref(), Expression::FunctionCall(_)));
}

#[test]
fn parse_mut_assignment() {
    let file = parse_file("mut x = 5;");

    let Statement::MutAssign(assign) = &file.statements[0] else {
        panic!("expected mut assignment");
    };
    assert_eq!(assign.name.value, "x");
    assert!(matches!(assign.value.as_ref(), Expression::Integer(i) if i.value == 5));
}

#[test]
fn parse_return_with_and_without_value() {
    let file = parse_file("return; return 5;");
    assert_eq!(file.statements.len(), 2);

    let Statement::Return(bare) = &file.statements[0] else {
        panic!("expected return statement");
    };
    assert!(bare.value.is_none());

    let Statement::Return(valued) = &file.statements[1] else {
        panic!("expected return statement");
    };
    assert!(valued.value.is_some());
}

#[test]
fn parse_func_declaration() {
    let file = parse_file("func id = [x: Int]: Int -> x;");

    let Statement::FuncDecl(decl) = &file.statements[0] else {
        panic!("expected func declaration");
    };
    assert_eq!(decl.name.value, "id");
    assert_eq!(decl.literal.params.len(), 1);
    assert!(matches!(decl.literal.body, FunctionBody::Expression(_)));
}

#[test]
fn parse_func_with_block_body() {
    let file = parse_file("func one = []: Int -> { return 1; };");

    let Statement::FuncDecl(decl) = &file.statements[0] else {
        panic!("expected func declaration");
    };
    let FunctionBody::Block(body) = &decl.literal.body else {
        panic!("expected block body");
    };
    assert_eq!(body.len(), 1);
    assert!(matches!(body[0], Statement::Return(_)));
}

#[test]
fn mutually_recursive_funcs_parse_in_source_order() {
    let file = parse_file(
        "func even = [n: Int]: Bool -> odd[n - 1]; func odd = [n: Int]: Bool -> even[n - 1];",
    );
    assert_eq!(file.statements.len(), 2);

    let Statement::FuncDecl(first) = &file.statements[0] else {
        panic!("expected func declaration");
    };
    let Statement::FuncDecl(second) = &file.statements[1] else {
        panic!("expected func declaration");
    };
    assert_eq!(first.name.value, "even");
    assert_eq!(second.name.value, "odd");
}

#[test]
fn parse_if_statement_with_else() {
    let file = parse_file("if a < b then print a else print b;");

    let Statement::If(stmt) = &file.statements[0] else {
        panic!("expected if statement");
    };
    assert!(matches!(
        stmt.condition.as_ref(),
        Expression::BinaryOp(b) if b.op == BinOpKind::Lt
    ));
    assert_eq!(stmt.then_branch.len(), 1);
    assert!(matches!(stmt.then_branch[0], Statement::Print(_)));
    let else_branch = stmt.else_branch.as_ref().expect("expected else branch");
    assert_eq!(else_branch.len(), 1);
    assert!(matches!(else_branch[0], Statement::Print(_)));
}

#[test]
fn parse_if_statement_with_block_branches() {
    let file = parse_file("if a then { print 1; print 2; } else { print 3; };");

    let Statement::If(stmt) = &file.statements[0] else {
        panic!("expected if statement");
    };
    assert_eq!(stmt.then_branch.len(), 2);
    let else_branch = stmt.else_branch.as_ref().expect("expected else branch");
    assert_eq!(else_branch.len(), 1);
}

#[test]
fn parse_if_statement_without_else() {
    let file = parse_file("if a then print a;");

    let Statement::If(stmt) = &file.statements[0] else {
        panic!("expected if statement");
    };
    assert_eq!(stmt.then_branch.len(), 1);
    assert!(stmt.else_branch.is_none());
}

#[test]
fn parse_if_expression() {
    let file = parse_file("let m = if a < b then b else a;");

    let Statement::Let(decl) = &file.statements[0] else {
        panic!("expected let declaration");
    };
    let Expression::IfThenElse(ite) = decl.value.as_ref() else {
        panic!("expected if expression");
    };
    assert!(matches!(ite.condition.as_ref(), Expression::BinaryOp(_)));
    assert!(matches!(ite.then_branch.as_ref(), Expression::Ident(_)));
    assert!(matches!(ite.else_branch.as_ref(), Expression::Ident(_)));
}

#[test]
fn parse_let_with_type_annotations() {
    let file = parse_file("let x: Int = 5; let f: [Int]: Int = g;");

    let Statement::Let(first) = &file.statements[0] else {
        panic!("expected let declaration");
    };
    assert!(matches!(
        first.annotation.as_ref(),
        Some(TypeAnnotation::Named(named)) if named.name == "Int"
    ));

    let Statement::Let(second) = &file.statements[1] else {
        panic!("expected let declaration");
    };
    let Some(TypeAnnotation::Function(func)) = second.annotation.as_ref() else {
        panic!("expected function type annotation");
    };
    assert_eq!(func.params.len(), 1);
    assert!(matches!(func.ret.as_ref(), TypeAnnotation::Named(named) if named.name == "Int"));
}

#[test]
fn parse_higher_order_parameter_types() {
    let file = parse_file("let compose = [f: [Int]: Int, x: Int]: Int -> f[x];");

    let Statement::Let(decl) = &file.statements[0] else {
        panic!("expected let declaration");
    };
    let Expression::FunctionLiteral(literal) = decl.value.as_ref() else {
        panic!("expected function literal");
    };
    assert_eq!(literal.params.len(), 2);
    assert!(matches!(literal.params[0].ty, TypeAnnotation::Function(_)));
    assert!(matches!(literal.params[1].ty, TypeAnnotation::Named(_)));
}

#[test]
fn statement_count_follows_semicolons() {
    let file = parse_file("let a = 1; let b = 2; print a + b;");
    assert_eq!(file.statements.len(), 3);
}

#[test]
fn stray_semicolons_are_tolerated() {
    let file = parse_file("let a = 1;; print a;");
    assert_eq!(file.statements.len(), 2);
}

#[test]
fn empty_let_initializer() {
    let (_, errors) = parse_with_errors("let x = ;");
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ParseError::EmptyLetExpression { .. }));
}

#[test]
fn parse_literal_kinds() {
    let file = parse_file(r#"print "hi\n"; print 'a'; print 3.14; print true;"#);
    assert_eq!(file.statements.len(), 4);

    let values: Vec<&Expression<()>> = file
        .statements
        .iter()
        .map(|stmt| match stmt {
            Statement::Print(print) => print.value.as_ref(),
            _ => panic!("expected print statement"),
        })
        .collect();

    assert!(matches!(values[0], Expression::String(s) if s.value == "hi\n"));
    assert!(matches!(values[1], Expression::Character(c) if c.value == 'a'));
    assert!(matches!(values[2], Expression::Double(d) if d.value == 3.14));
    assert!(matches!(values[3], Expression::Boolean(b) if b.value));
}

#[test]
fn sibling_statement_errors_accumulate() {
    let (file, errors) = parse_with_errors("let = 1; print ; mut = 2;");
    assert!(file.statements.is_empty());
    assert_eq!(errors.len(), 3);
    assert!(matches!(errors[0], ParseError::MalformedLetDeclaration { .. }));
    assert!(matches!(errors[1], ParseError::EmptyPrintExpression { .. }));
    assert!(matches!(errors[2], ParseError::MalformedMutAssignment { .. }));
}

#[test]
fn good_statements_survive_bad_neighbors() {
    let (file, errors) = parse_with_errors("let a = 1; let = 2; print a;");
    assert_eq!(errors.len(), 1);
    assert_eq!(file.statements.len(), 2);
    assert!(matches!(file.statements[0], Statement::Let(_)));
    assert!(matches!(file.statements[1], Statement::Print(_)));
}

#[test]
fn tree_ranges_contain_their_children() {
    let file = parse_file("print 1 + 2 * 3;");

    let Statement::Print(print) = &file.statements[0] else {
        panic!("expected print statement");
    };
    let Expression::BinaryOp(binop) = print.value.as_ref() else {
        panic!("expected binary op");
    };
    // a binary node's range is the union of its operands' ranges
    assert_eq!(binop.position, binop.left.pos().merge(&binop.right.pos()));
    // and the statement's range covers its expression
    assert_eq!(print.position.merge(&binop.position), print.position);
}

#[test]
fn reparsing_is_deterministic() {
    let input = "let a = 1; let = 2; print (3 + ); if a then print a;";
    let (first_file, first_errors) = parse_with_errors(input);
    let (second_file, second_errors) = parse_with_errors(input);

    assert_eq!(first_errors, second_errors);
    assert_eq!(
        format!("{:?}", first_file.statements),
        format!("{:?}", second_file.statements)
    );
}
