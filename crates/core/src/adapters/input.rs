pub mod candidate_file;
