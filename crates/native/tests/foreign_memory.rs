// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use recframe_native::{ForeignFileData, ForeignString, SummaryConfig, live_foreign_allocations, summarize_dir};
use recframe_testing::{temp_dir, write_file};

// Single test: the live counter is process-wide and tests in one binary run concurrently.
#[test]
fn test_every_foreign_allocation_is_released() {
	assert_eq!(live_foreign_allocations(), 0);

	let greeting = ForeignString::hello().unwrap();
	assert_eq!(live_foreign_allocations(), 1);
	assert_eq!(greeting.to_str(), Ok("hello"));
	greeting.release();
	assert_eq!(live_foreign_allocations(), 0);

	temp_dir(|dir| {
		let path = write_file(dir, "notes.txt", "a\nb\n")?;

		{
			let _first = ForeignFileData::read(&path, 1024).unwrap();
			let _second = ForeignFileData::read(&path, 1024).unwrap();
			assert_eq!(live_foreign_allocations(), 2);
		}
		assert_eq!(live_foreign_allocations(), 0);

		for i in 0..50 {
			write_file(dir, format!("many/{i}.txt"), "line\n".repeat(i))?;
		}
		let summary = summarize_dir(dir, &SummaryConfig::new()).unwrap();
		assert_eq!(summary.files, 51);
		assert_eq!(live_foreign_allocations(), 0);

		let result = std::panic::catch_unwind(|| {
			let _held = ForeignFileData::read(&path, 1024).unwrap();
			panic!("unwinding with a live handle");
		});
		assert!(result.is_err());
		assert_eq!(live_foreign_allocations(), 0);
		Ok(())
	})
	.unwrap();
}
