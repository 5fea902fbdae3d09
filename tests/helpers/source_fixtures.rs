//! Common source code fixtures for tests.

/// A function returning a struct declared after it.
pub const DEFINITION_SOL: &str = r#"pragma solidity ^0.8.0;

contract Definition {
    function make() public pure returns (S memory) {
        S memory s;
        return s;
    }

    struct S {
        uint x;
    }
}
"#;

pub const PARENT_SOL: &str = r#"pragma solidity ^0.8.0;

contract Base {
    uint internal seed;

    constructor(uint initial) {
        seed = initial;
    }

    function ping() public view returns (uint) {
        return seed;
    }
}
"#;

/// Extends `Base` without declaring a constructor of its own.
pub const CHILD_SOL: &str = r#"pragma solidity ^0.8.0;

import "./Parent.sol";

contract Child is Base(42) {
    function pong() public view returns (uint) {
        return ping() + seed;
    }
}
"#;

/// Calls `Base`'s constructor through a modifier-style invocation.
pub const CHILD_WITH_CONSTRUCTOR_SOL: &str = r#"pragma solidity ^0.8.0;

import { Base } from "./Parent.sol";

contract Child is Base {
    constructor() Base(7) {}
}
"#;

pub const SHADOWING_SOL: &str = r#"contract Shadow {
    uint value;

    function outer() public view returns (uint) {
        uint value = 1;
        return value;
    }

    function member() public view returns (uint) {
        return value;
    }
}
"#;

pub const TOKEN_SOL: &str = r#"contract Token {
    mapping(address => uint) balances;

    event Transfer(address from, address to, uint amount);

    function transfer(address to, uint amount) public {
        balances[msg.sender] -= amount;
        balances[to] += amount;
        emit Transfer(msg.sender, to, amount);
    }
}
"#;
