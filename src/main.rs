use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use std::path::{Path, PathBuf};
use std::{fs::read_to_string, process::ExitCode};

const EXIT_DATA_ERROR: u8 = 65;
const EXIT_SOFTWARE_ERROR: u8 = 70;

#[derive(Debug, Parser)]
#[clap(name = "siever", version)]
pub struct CLArgs {
    #[clap(subcommand)]
    pub routine: SieverCommand,
}

#[derive(Debug, Subcommand)]
pub enum SieverCommand {
    /// Print the token stream of a source file.
    Tokenize {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "basic")]
        format: TokenFormat,
    },
    /// Print the syntax tree of a single expression, or of a whole program.
    Parse {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "sexpr")]
        format: ExpressionFormat,
        #[clap(long = "statements")]
        statements: bool,
    },
    /// Evaluate a single expression and print its value.
    Evaluate { path: PathBuf },
    /// Execute a program.
    Run {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "basic")]
        format: ErrorFormat,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TokenFormat {
    Debug,
    Basic,
    Pretty,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ExpressionFormat {
    Debug,
    #[clap(name = "sexpr")]
    SExpr,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ErrorFormat {
    Debug,
    Basic,
    Pretty,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    env_logger::init();
    let args = CLArgs::parse();
    match args.routine {
        SieverCommand::Tokenize { path, format } => {
            log::info!("Tokenizing {:?}...", path);
            let src = read_to_string(&path)?;
            Ok(tokenize(&src, &path, &format))
        }
        SieverCommand::Parse {
            path,
            format,
            statements,
        } => {
            log::info!("Parsing {:?}...", path);
            let src = read_to_string(&path)?;
            Ok(parse(&src, &format, statements))
        }
        SieverCommand::Evaluate { path } => {
            log::info!("Evaluating {:?}...", path);
            let src = read_to_string(&path)?;
            Ok(evaluate(&src))
        }
        SieverCommand::Run { path, format } => {
            log::info!("Running {:?}...", path);
            let src = read_to_string(&path)?;
            Ok(run(&src, &path, &format))
        }
    }
}

fn tokenize(src: &str, path: &Path, format: &TokenFormat) -> ExitCode {
    use siever::lexer::formatter::{
        BasicFormatter, DebugFormatter, PrettyFormatter, ToFormatter, TokenFormatter,
    };
    use siever::lexer::{Lexer, TokenKind};

    let mut scanner = Lexer::new(src);
    let formatter: Box<dyn TokenFormatter> = match format {
        TokenFormat::Debug => Box::new(ToFormatter::<DebugFormatter>::create_formatter(&scanner)),
        TokenFormat::Basic => Box::new(ToFormatter::<BasicFormatter>::create_formatter(&scanner)),
        TokenFormat::Pretty => Box::new(PrettyFormatter::new(src, path)),
    };
    let mut succeeded = true;
    loop {
        match scanner.next_token() {
            Ok(token) => {
                println!("{}", formatter.format(&token));
                if matches!(token.kind, TokenKind::Eof) {
                    break;
                }
            }
            Err(error) => {
                eprintln!("{}", formatter.format_lexical_error(&error));
                succeeded = false;
            }
        };
    }
    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_DATA_ERROR)
    }
}

fn parse(src: &str, format: &ExpressionFormat, statements: bool) -> ExitCode {
    use siever::diagnostic::StderrReporter;
    use siever::expression::formatter::{
        DebugFormatter, ExpressionFormatter, SExpressionFormatter,
    };
    use siever::lexer::scan;
    use siever::parser::Parser;
    use siever::statement::formatter::StatementFormatter;

    let mut reporter = StderrReporter::new();
    let tokens = scan(src, &mut reporter);
    if reporter.had_lexical_error {
        return ExitCode::from(EXIT_DATA_ERROR);
    }

    let formatter: Box<dyn ExpressionFormatter> = match format {
        ExpressionFormat::Debug => Box::new(DebugFormatter),
        ExpressionFormat::SExpr => Box::new(SExpressionFormatter),
    };
    let mut parser = Parser::new(&tokens);
    let output = if statements {
        parser.parse().map(|program| match format {
            ExpressionFormat::Debug => format!("{program:?}"),
            ExpressionFormat::SExpr => StatementFormatter.format_program(&program),
        })
    } else {
        parser
            .parse_expression()
            .and_then(|expr| parser.finish().map(|_| formatter.format(&expr)))
    };
    match output {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", formatter.format_error(&error));
            ExitCode::from(EXIT_DATA_ERROR)
        }
    }
}

fn evaluate(src: &str) -> ExitCode {
    use siever::diagnostic::StderrReporter;
    use siever::interpreter::{context::StdioContext, Interpreter};
    use siever::lexer::scan;
    use siever::parser::Parser;

    let mut reporter = StderrReporter::new();
    let tokens = scan(src, &mut reporter);
    if reporter.had_lexical_error {
        return ExitCode::from(EXIT_DATA_ERROR);
    }

    let mut parser = Parser::new(&tokens);
    let expr = match parser
        .parse_expression()
        .and_then(|expr| parser.finish().map(|_| expr))
    {
        Ok(expr) => expr,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::from(EXIT_DATA_ERROR);
        }
    };

    let mut interpreter = Interpreter::new(StdioContext);
    match interpreter.interpret(&expr, &mut reporter) {
        Some(_) => ExitCode::SUCCESS,
        None => ExitCode::from(EXIT_SOFTWARE_ERROR),
    }
}

fn run(src: &str, path: &Path, format: &ErrorFormat) -> ExitCode {
    use siever::interpreter::{context::StdioContext, Interpreter};
    use siever::lexer::formatter::{self as token_formatter, TokenFormatter};
    use siever::lexer::Lexer;
    use siever::parser::Parser;
    use siever::value::formatter::{
        BasicFormatter, DebugFormatter, PrettyFormatter, ValueFormatter,
    };

    let (lexical_formatter, value_formatter): (Box<dyn TokenFormatter>, Box<dyn ValueFormatter>) =
        match format {
            ErrorFormat::Debug => (
                Box::new(token_formatter::DebugFormatter),
                Box::new(DebugFormatter),
            ),
            ErrorFormat::Basic => (
                Box::new(token_formatter::BasicFormatter),
                Box::new(BasicFormatter),
            ),
            ErrorFormat::Pretty => (
                Box::new(token_formatter::PrettyFormatter::new(src, path)),
                Box::new(PrettyFormatter::new(src, path)),
            ),
        };

    let scanned = Lexer::new(src).scan_all();
    for error in scanned.errors.iter() {
        eprintln!("{}", lexical_formatter.format_lexical_error(error));
    }
    if !scanned.errors.is_empty() {
        return ExitCode::from(EXIT_DATA_ERROR);
    }

    let program = match Parser::new(&scanned.tokens).parse() {
        Ok(program) => program,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::from(EXIT_DATA_ERROR);
        }
    };

    let mut interpreter = Interpreter::new(StdioContext);
    match interpreter.run(&program) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", value_formatter.format_error(&error));
            ExitCode::from(EXIT_SOFTWARE_ERROR)
        }
    }
}
