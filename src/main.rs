fn main() {
    asm::term::main()
}
