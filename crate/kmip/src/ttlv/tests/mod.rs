mod extensions;
mod wire;
