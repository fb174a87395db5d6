//! Parsing whole command lines through the public API.

use arosh::{
    parse, tokenize, ConditionalOperator, ParseErrorKind, RedirectionOperator,
    SeparatorOperator, TokenType, AST,
};
use rstest::rstest;

fn s(value: &str) -> String {
    value.to_string()
}

#[test]
fn sequence_folds_left_across_separators() {
    let program = parse("echo 123 & ls & pacman -Syu; nvim").unwrap();
    let expected = AST::sequence(
        SeparatorOperator::Semi,
        AST::sequence(
            SeparatorOperator::Amp,
            AST::sequence(
                SeparatorOperator::Amp,
                AST::command("echo 123"),
                Some(AST::command("ls")),
            ),
            Some(AST::command("pacman -Syu")),
        ),
        Some(AST::command("nvim")),
    );
    assert_eq!(program, AST::program(vec![expected]));
}

#[test]
fn pipe_binds_tighter_than_conditionals() {
    let program = parse("find -name dir | ls || ls /other && grep file").unwrap();
    let expected = AST::conditional(
        ConditionalOperator::And,
        AST::conditional(
            ConditionalOperator::Or,
            AST::pipe(AST::command("find -name dir"), AST::command("ls")),
            AST::command("ls /other"),
        ),
        AST::command("grep file"),
    );
    assert_eq!(program, AST::program(vec![expected]));
}

#[test]
fn pipes_on_both_sides_of_amp() {
    let program = parse("cat file | grep struct & echo sup | grep").unwrap();
    let expected = AST::sequence(
        SeparatorOperator::Amp,
        AST::pipe(AST::command("cat file"), AST::command("grep struct")),
        Some(AST::pipe(AST::command("echo sup"), AST::command("grep"))),
    );
    assert_eq!(program, AST::program(vec![expected]));
}

#[test]
fn trailing_amp_leaves_rhs_empty() {
    let program = parse("tmux &").unwrap();
    let expected = AST::sequence(SeparatorOperator::Amp, AST::command("tmux"), None);
    assert_eq!(program, AST::program(vec![expected]));
}

#[rstest]
#[case::amp_then_pipe("cat dependecies.txt & | grep pandas", "&", "|")]
#[case::amp_then_and("cat dependecies.txt & && grep pandas", "&", "&&")]
#[case::amp_then_semi("cat dependecies.txt & ;", "&", ";")]
#[case::pipe_then_or("ls | || wc", "|", "||")]
#[case::semi_then_amp("ls ; & wc", ";", "&")]
fn operator_followed_by_operator_fails(
    #[case] line: &str,
    #[case] operator: &str,
    #[case] found: &str,
) {
    let err = parse(line).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::MalformedOperatorSequence {
            operator: s(operator),
            found: s(found),
        }
    );
    assert_eq!(err.line, 1);
    assert_eq!(err.source_line, line);
}

#[test]
fn malformed_sequence_reports_column_of_second_operator() {
    let err = parse("cat dependecies.txt & | grep pandas").unwrap_err();
    assert_eq!(err.column, 23);
    assert!(err.to_string().contains("1:23"));
}

#[rstest]
#[case::and("ls &&", "&&")]
#[case::or("ls ||", "||")]
#[case::pipe("ls |", "|")]
#[case::pipe_after_sequence("a ; b |", "|")]
fn missing_operand_at_end_of_line(#[case] line: &str, #[case] operator: &str) {
    assert_eq!(
        parse(line).unwrap_err().kind,
        ParseErrorKind::UnexpectedEof {
            operator: s(operator)
        }
    );
}

#[rstest]
#[case::single("ls")]
#[case::params("tmux attach -t dotfiles")]
#[case::many_spaces("git   commit    -m    msg")]
#[case::tabs("a\tb\tc")]
fn first_word_is_name_rest_are_params(#[case] line: &str) {
    let words: Vec<&str> = line.split_whitespace().collect();
    let program = parse(line).unwrap();
    let expected = AST::simple_command(
        words[0],
        words[1..].iter().map(|w| s(w)).collect(),
        vec![],
    );
    assert_eq!(program, AST::program(vec![expected]));
}

#[rstest]
#[case::stderr("sort 2> errors", Some(2), RedirectionOperator::Great, "errors")]
#[case::append("log >> history", None, RedirectionOperator::DGreat, "history")]
#[case::heredoc_dash("cat 9<<- EOF", Some(9), RedirectionOperator::DLessDash, "EOF")]
#[case::dup_in("read 0<& input", Some(0), RedirectionOperator::LessAnd, "input")]
#[case::read_write("exec 3<> socket", Some(3), RedirectionOperator::LessGreat, "socket")]
#[case::clobber("echo >| out", None, RedirectionOperator::Clobber, "out")]
fn redirection_is_attached_to_command(
    #[case] line: &str,
    #[case] io_number: Option<u32>,
    #[case] operator: RedirectionOperator,
    #[case] file: &str,
) {
    let name = line.split_whitespace().next().unwrap();
    let program = parse(line).unwrap();
    let expected = AST::simple_command(name, vec![], vec![AST::redirection(io_number, operator, file)]);
    assert_eq!(program, AST::program(vec![expected]));
}

#[test]
fn multi_digit_prefix_stays_a_param() {
    let program = parse("echo 123< file").unwrap();
    let expected = AST::simple_command(
        "echo",
        vec![s("123")],
        vec![AST::redirection(None, RedirectionOperator::Less, "file")],
    );
    assert_eq!(program, AST::program(vec![expected]));
}

#[test]
fn redirections_inside_a_pipeline() {
    assert_eq!(
        parse("sort < names | uniq > counts").unwrap().to_string(),
        "(pipe (simpleCommand sort [] (redirection < names)) \
         (simpleCommand uniq [] (redirection > counts)))"
    );
}

#[rstest]
#[case::doubled_amp("&&&", vec![TokenType::AndAnd, TokenType::Amp])]
#[case::doubled_pipe("|||", vec![TokenType::OrOr, TokenType::Pipe])]
#[case::heredoc("echo 3<< file", vec![TokenType::Word, TokenType::IoNumber, TokenType::DLess, TokenType::Word])]
#[case::heredoc_dash("echo 9<<- file", vec![TokenType::Word, TokenType::IoNumber, TokenType::DLessDash, TokenType::Word])]
#[case::multi_digit("echo 123< file", vec![TokenType::Word, TokenType::Word, TokenType::Less, TokenType::Word])]
#[case::dup_out("echo 9>& file", vec![TokenType::Word, TokenType::IoNumber, TokenType::GreatAnd, TokenType::Word])]
fn token_kinds(#[case] line: &str, #[case] expected: Vec<TokenType>) {
    let kinds: Vec<TokenType> = tokenize(line).into_iter().map(|t| t.token_type).collect();
    assert_eq!(kinds, expected);
}

#[rstest]
#[case("echo 123 & ls & pacman -Syu; nvim")]
#[case("find -name dir | ls || ls /other && grep file")]
#[case("sort 2> errors | uniq &")]
fn rendering_is_deterministic(#[case] line: &str) {
    let first = parse(line).unwrap().to_string();
    let second = parse(line).unwrap().to_string();
    assert_eq!(first, second);
}

#[test]
fn canonical_rendering() {
    assert_eq!(
        parse("a | b & c").unwrap().to_string(),
        "(sequence & (pipe (simpleCommand a []) (simpleCommand b [])) (simpleCommand c []))"
    );
}

#[test]
fn newlines_are_whitespace() {
    let program = parse("echo one\ntwo").unwrap();
    assert_eq!(program, AST::program(vec![AST::command("echo one two")]));
}
