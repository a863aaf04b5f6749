fn main() {
    // TODO: parse args
    println!("{}", greet("world"));
}

fn greet(name: &str) -> String {
    format!("Hello, {}!", name)
}
