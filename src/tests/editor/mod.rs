mod reducer_tests;
mod scenario_tests;
