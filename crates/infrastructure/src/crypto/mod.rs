mod envelope;

pub use envelope::EnvelopeCipher;
