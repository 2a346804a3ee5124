use std::time::{Duration, Instant};

use viewservice::{ServerId, View, ViewServiceRequestHandler};

use crate::steps::servers::ServerPool;

fn wait_timeout() -> Duration {
	Duration::from_secs(5)
}

/// Keeps the pool heartbeating until the committed view satisfies the predicate.
pub fn wait_for_view<H, F>(pool: &mut ServerPool<H>, description: &str, predicate: F) -> View
	where H: ViewServiceRequestHandler,
		  F: Fn(&View) -> bool {
	let deadline = Instant::now() + wait_timeout();
	loop {
		pool.ping_all();

		let view = pool.query();
		assert_roles_are_distinct(&view);

		if predicate(&view) {
			info!("Reached '{}': {}", description, view);
			return view;
		}

		if Instant::now() > deadline {
			panic!("Timed out waiting for '{}'. Last {}", description, view);
		}

		super::sleep_ticks(1);
	}
}

/// Keeps the pool heartbeating for the number of ticks and returns the committed view.
pub fn ping_for_ticks<H: ViewServiceRequestHandler>(pool: &mut ServerPool<H>, ticks: u32) -> View {
	for _ in 0..ticks {
		pool.ping_all();
		assert_roles_are_distinct(&pool.query());
		super::sleep_ticks(1);
	}

	pool.query()
}

pub fn assert_roles_are_distinct(view: &View) {
	match view.primary {
		Some(_) => assert_ne!(view.primary, view.backup, "primary and backup are the same: {}", view),
		None => assert_eq!(None, view.backup, "backup without primary: {}", view),
	}
}

pub fn has_roles(view: &View, primary: Option<&str>, backup: Option<&str>) -> bool {
	view.primary == primary.map(ServerId::new) && view.backup == backup.map(ServerId::new)
}
