fn main() {
    mindhaven_frontend::boot();
}
