//! Walkthrough of one basket session: add two articles, delete them
//! again, and show what a lapsed TTL does to a stale basket.
//!
//! Run with `RUST_LOG=debug` to see the engine's transition events.

use hamper::{
    Article, BasketState, Engine, EngineConfig, MemoryStore, Symbol, TransitionContext,
};

fn print_basket(engine: &Engine<MemoryStore>, key: &str) {
    let basket = engine.store().get(key).expect("basket exists");
    println!(
        "basket '{}': state={} items={} total={} {}",
        key,
        basket.state(),
        basket.items().len(),
        basket.total_cost(),
        basket.currency,
    );
    for item in basket.items() {
        println!("  - {} ({})", item.article.name, item.article.code);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut engine = Engine::new(MemoryStore::new());
    let tea = Article::new("Green tea", "X42", 120);
    let coffee = Article::new("Coffee beans", "Y7", 260);

    println!("== filling the basket");
    engine.transition("s1", Symbol::Add, &TransitionContext::with_article(tea.clone()))?;
    engine.transition("s1", Symbol::Add, &TransitionContext::with_article(coffee.clone()))?;
    print_basket(&engine, "s1");

    println!("== deleting X42 (two items, stays FILLED)");
    engine.transition("s1", Symbol::Delete, &TransitionContext::with_article(tea.clone()))?;
    print_basket(&engine, "s1");

    println!("== deleting Y7 (single item, collapses to EMPTY)");
    let state = engine.transition("s1", Symbol::Delete, &TransitionContext::with_article(coffee))?;
    assert_eq!(state, BasketState::Empty);
    print_basket(&engine, "s1");

    println!("== a zero-TTL engine expires the basket between calls");
    let mut hasty = Engine::with_config(
        MemoryStore::new(),
        EngineConfig {
            ttl: chrono::Duration::zero(),
        },
    );
    hasty.transition("s2", Symbol::Add, &TransitionContext::with_article(tea.clone()))?;
    std::thread::sleep(std::time::Duration::from_millis(5));
    hasty.transition("s2", Symbol::Add, &TransitionContext::with_article(tea))?;
    let basket = hasty.store().get("s2").expect("basket exists");
    println!(
        "basket 's2' after expiry + re-add: state={} items={} (EXPIRE wiped the stale item)",
        basket.state(),
        basket.items().len(),
    );

    Ok(())
}
