use pbkdf2_encoder::PasswordEncoder;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match PasswordEncoder::new().encode(b"123456") {
        Ok(hash) => println!("{}", hash),
        Err(e) => {
            eprintln!("Hashing error: {}", e);
            std::process::exit(1);
        }
    }
}
