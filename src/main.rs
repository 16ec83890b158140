use std::process;

use brackish::lexer::Token;
use brackish::parser::parse;

const INPUT: &str = r#"
func max = [a: Int, b: Int]: Int -> {
    if a < b then return b;
    return a;
};

let scale = [x: Int]: Int -> x * 10;

print max[3, 4];
print scale[max[1, 2]] + 1;
"#;

fn main() -> anyhow::Result<()> {
    let tokens = Token::lex(INPUT)?;
    let (file, errors) = parse(tokens);

    if !errors.is_empty() {
        for error in &errors {
            eprintln!("{error}");
        }
        process::exit(1);
    }

    println!("{file:#?}");

    Ok(())
}
