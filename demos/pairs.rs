//! Kuratowski's definition of ordered pairs (x, y) = {{x}, {x, y}} reduces pairs, and with them
//! relations, to plain sets. Here we build a cartesian product, look at the sets underneath, and
//! read the coordinates back out of them.

use better_set::prelude::*;

fn main() -> Result<(), SetError> {
    let domain = set![1, 2];
    let range = set!["a", "b"];
    let product = domain.product(&range)?;
    println!("{domain} × {range} = {product}");

    for pair in product.pairs() {
        // Forget the pair, keep only the set encoding it.
        let encoding = pair.as_set().clone();
        let recovered = OrderedPair::try_from(encoding.clone())?;
        println!(
            "{encoding} = ({}, {})",
            recovered.first(),
            recovered.second()
        );
    }

    // An interesting coincidence: the Zermelo natural 2 = {{∅}} is the pair (∅, ∅).
    let degenerate: Set = "{{∅}}".parse().map_err(|_| SetError::NotAPair)?;
    let pair = OrderedPair::try_from(degenerate)?;
    println!("{{{{∅}}}} = {pair}");
    Ok(())
}
