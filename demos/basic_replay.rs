//! Record an AVL run and step through it like a replay client would.

use avl_replay::{generate_insertion_sequence, parse_values, Playback};

fn main() -> anyhow::Result<()> {
    // Same default input the visualizer page starts with.
    let values = parse_values("10,20,30,40,50,25");
    let events = generate_insertion_sequence(&values);
    println!("recorded {} events for {:?}", events.len(), values);

    let mut playback = Playback::new(events);
    loop {
        if let Some(event) = playback.current() {
            event.snapshot().validate()?;
            println!(
                "step {:>2}: [{:<9}] {} (rotations={}, inserts={})",
                playback.position() + 1,
                event.kind,
                event.explanation,
                event.meta.rotations,
                event.meta.inserts
            );
        }
        if !playback.next() {
            break;
        }
    }

    let fingerprint = playback.events().fingerprint();
    println!("fingerprint {}", fingerprint.to_hex());
    Ok(())
}
