//! Speaking queue ordering
//!
//! 1. The mover goes first if they have not yet spoken.
//! 2. Members who have not spoken come before those who have.
//! 3. Within each group, pro and con alternate (pro first), each side
//!    ordered by least recent speech, then by request time.

use super::context::{SpeakingQueueEntry, Stance};

pub fn sort_queue(queue: &[SpeakingQueueEntry], mover: Option<&str>) -> Vec<SpeakingQueueEntry> {
    let mut ordered = Vec::with_capacity(queue.len());
    let mut rest: Vec<SpeakingQueueEntry> = queue.to_vec();

    if let Some(mover) = mover
        && let Some(pos) = rest
            .iter()
            .position(|e| e.participant == mover && !e.has_spoken_before)
    {
        ordered.push(rest.remove(pos));
    }

    let (repeat, fresh): (Vec<_>, Vec<_>) = rest.into_iter().partition(|e| e.has_spoken_before);
    ordered.extend(interleave(fresh));
    ordered.extend(interleave(repeat));
    ordered
}

fn interleave(group: Vec<SpeakingQueueEntry>) -> Vec<SpeakingQueueEntry> {
    let (mut pro, mut con): (Vec<_>, Vec<_>) =
        group.into_iter().partition(|e| e.stance == Stance::Pro);
    for side in [&mut pro, &mut con] {
        side.sort_by_key(|e| (e.last_spoke_time, e.request_time));
    }

    let mut merged = Vec::with_capacity(pro.len() + con.len());
    let mut pro = pro.into_iter();
    let mut con = con.into_iter();
    loop {
        match (pro.next(), con.next()) {
            (None, None) => break,
            (p, c) => {
                merged.extend(p);
                merged.extend(c);
            }
        }
    }
    merged
}
