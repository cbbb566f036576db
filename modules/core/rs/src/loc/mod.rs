pub use strand::Strand;

mod strand;
