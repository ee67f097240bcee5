mod export_tests;
mod leads_tests;
mod search_tests;
