use std::thread;
use std::time::Duration;

use viewservice::{ViewServiceConfiguration, ViewServiceTimings, ViewServiceWorker};
use viewservice_modules::InProcViewServiceCommunicator;

pub mod servers;
pub mod view;

pub fn tick_interval() -> Duration {
	Duration::from_millis(50)
}

pub fn timings() -> ViewServiceTimings {
	ViewServiceTimings::with_dead_ticks(tick_interval(), 5)
}

pub fn communication_timeout() -> Duration {
	Duration::from_millis(1000)
}

pub fn sleep_ticks(ticks: u32) {
	thread::sleep(tick_interval() * ticks);
}

pub fn start_view_service() -> (ViewServiceWorker, InProcViewServiceCommunicator) {
	let communicator = InProcViewServiceCommunicator::new("cases", communication_timeout());

	let config = ViewServiceConfiguration {
		request_channels: communicator.clone(),
		timings: timings(),
	};

	let worker = viewservice::start_view_service(config).expect("can start view service");

	(worker, communicator)
}
