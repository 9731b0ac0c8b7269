use std::{
    env,
    io,
    process,
};
use tern::{Engine, Value};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let code = env::args().skip(1).collect::<Vec<_>>().join(" ");
    let engine = Engine::default().with_global("A", Value::Int(123));

    let result = engine.parse(&code).and_then(|ast| {
        println!("{:?}", ast);
        engine.eval(&ast)
    });

    match result {
        Ok(val) => println!("{:?}", val),
        Err(err) => {
            eprintln!("error: {}", err.in_context(&code));
            process::exit(1);
        },
    }
}
