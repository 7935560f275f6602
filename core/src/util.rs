pub(crate) mod bit_mixer;
