mod error_tests;
mod post_transition_tests;
mod propagation_tests;
