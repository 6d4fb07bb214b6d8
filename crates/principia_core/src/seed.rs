//! Example data for first start.
//!
//! # Invariants
//! - Seeding only happens when `principles` is empty, checked against the
//!   store itself rather than an in-process flag.
//! - Check and insert share one IMMEDIATE transaction, so concurrent cold
//!   starts serialize on the SQLite write lock and cannot double-seed.

use crate::model::principle::{NewPrinciple, Principle, PrincipleColor};
use crate::model::tactic::{NewTactic, Tactic};
use crate::repo::principle_repo::{count_principles, insert_principle, insert_tactic, RepoResult};
use log::info;
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Outcome of one seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded { principles: usize, tactics: usize },
    AlreadyPopulated,
}

struct SeedPrinciple {
    title: &'static str,
    description: &'static str,
    category: &'static str,
    color: PrincipleColor,
    tactics: &'static [(&'static str, &'static str)],
}

const SEED: &[SeedPrinciple] = &[
    SeedPrinciple {
        title: "People buy when perceived value exceeds cost",
        description: "To sell more, you need to increase perceived value or reduce the cost they pay (in time, money, & effort). This is the fundamental law of every transaction.",
        category: "Sales",
        color: PrincipleColor::Orange,
        tactics: &[
            (
                "Create an Instagram 'Story Highlights' reel of testimonials/client wins",
                "Social proof increases perceived value by showing real results others have achieved.",
            ),
            (
                "List all benefits and their 'estimated value' in your sales pitch",
                "Stack the value so the total far exceeds the price point.",
            ),
            (
                "Drop the price by $500 for a promotion",
                "Reducing cost is one side of the value equation. Use sparingly.",
            ),
        ],
    },
    SeedPrinciple {
        title: "Humans are naturally drawn to stories",
        description: "Stories bypass the logical brain and speak directly to emotions. People remember stories 22x more than facts alone. Use narrative structure to persuade.",
        category: "Communication",
        color: PrincipleColor::Blue,
        tactics: &[
            (
                "Tell your origin story of struggle to success",
                "Personal transformation stories create emotional connection and relatability.",
            ),
            (
                "Show 'before and after' as a teaser for thumbnails",
                "Transformation arcs are the most compelling story structure.",
            ),
            (
                "Use a story as a way to teach a lesson",
                "Parables and case studies make abstract concepts concrete and memorable.",
            ),
        ],
    },
    SeedPrinciple {
        title: "People love to look at things",
        description: "The eyes love to figure stuff out. More of the brain is dedicated to processing vision than any other function. Visual content always outperforms text-only.",
        category: "Marketing",
        color: PrincipleColor::Green,
        tactics: &[
            (
                "Have moving visuals every 5 seconds in VSL videos",
                "Constant visual stimulation keeps attention and prevents drop-off.",
            ),
            (
                "Use pictures on Miro instead of just text documents",
                "Visual presentations are processed 60,000x faster than text.",
            ),
            (
                "Send a loom video for outreach instead of just text",
                "Video outreach stands out and leverages the visual processing preference.",
            ),
        ],
    },
    SeedPrinciple {
        title: "People naturally focus on faces",
        description: "Humans are hardwired to notice and process faces before anything else. This evolutionary trait can be leveraged in thumbnails, ads, and content.",
        category: "Psychology",
        color: PrincipleColor::Purple,
        tactics: &[
            (
                "Use faces in your YouTube thumbnails",
                "YouTube currently requires thumbnails. Faces draw instant attention in a feed.",
            ),
            (
                "Include team headshots on your landing page",
                "Faces build trust and humanize your brand.",
            ),
        ],
    },
    SeedPrinciple {
        title: "People feel compelled to return what they receive",
        description: "The reciprocity principle: when someone gives us something, we feel an obligation to give back. Free value creates a psychological debt.",
        category: "Psychology",
        color: PrincipleColor::Teal,
        tactics: &[
            (
                "Send loom videos positioned as free value in cold emails",
                "Providing free, personalized value triggers reciprocity and starts conversations.",
            ),
            (
                "Send personalized AND automated voice notes using AI",
                "Personal touches create stronger reciprocity than generic outreach.",
            ),
        ],
    },
];

/// Number of principles in the example set.
pub fn seed_principle_count() -> usize {
    SEED.len()
}

/// Number of tactics in the example set.
pub fn seed_tactic_count() -> usize {
    SEED.iter().map(|principle| principle.tactics.len()).sum()
}

/// Inserts the example set when the store has no principles yet.
pub fn seed_if_empty(conn: &Connection) -> RepoResult<SeedOutcome> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    if count_principles(&tx)? > 0 {
        return Ok(SeedOutcome::AlreadyPopulated);
    }

    let mut tactic_total = 0;
    for (principle_order, seed) in (0..).zip(SEED) {
        let principle = Principle::create(
            NewPrinciple::new(seed.title, seed.description)
                .category(seed.category)
                .color(seed.color)
                .order(principle_order),
        );
        insert_principle(&tx, &principle)?;

        for (tactic_order, (title, description)) in (0..).zip(seed.tactics) {
            let tactic = Tactic::create(
                NewTactic::new(principle.id, *title)
                    .description(*description)
                    .order(tactic_order),
            );
            insert_tactic(&tx, &tactic)?;
            tactic_total += 1;
        }
    }
    tx.commit()?;

    info!(
        "event=db_seed module=seed status=ok principles={} tactics={}",
        SEED.len(),
        tactic_total
    );
    Ok(SeedOutcome::Seeded {
        principles: SEED.len(),
        tactics: tactic_total,
    })
}
