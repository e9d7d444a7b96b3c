use super::*;

enum Chain {
    End,
    Link(Box<Chain>),
}

fn build(len: usize) -> Chain {
    let mut chain = Chain::End;
    for _ in 0..len {
        chain = Chain::Link(Box::new(chain));
    }
    chain
}

fn length(chain: &Chain) -> usize {
    ensure_sufficient_stack(|| match chain {
        Chain::End => 0,
        Chain::Link(next) => length(next) + 1,
    })
}

fn release(chain: Chain) {
    // Dropping a long Box chain recursively would overflow too.
    let mut current = chain;
    while let Chain::Link(next) = current {
        current = *next;
    }
}

#[test]
fn test_short_chain() {
    let chain = build(16);
    assert_eq!(length(&chain), 16);
    release(chain);
}

#[test]
fn test_chain_deeper_than_native_stack() {
    let chain = build(200_000);
    assert_eq!(length(&chain), 200_000);
    release(chain);
}

#[test]
fn test_passes_through_results() {
    let result: Result<usize, &str> = ensure_sufficient_stack(|| Err("no referent"));
    assert_eq!(result, Err("no referent"));
}
