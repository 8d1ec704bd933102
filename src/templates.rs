//! File templates for `fargo new` and for tool configs generated on
//! demand (`.clang-format`, `Doxyfile`, `README.md`).

use crate::profile::PROFILE_DEFAULTS;

/// Top-level `CMakeLists.txt`: the three canonical targets, GoogleTest
/// and Google Benchmark via FetchContent, compile_commands.json export
/// for static analysis.
pub fn cmakelists(project_name: &str) -> String {
    format!(
        r#"cmake_minimum_required(VERSION 3.18)

# ---- Project ----
project({project_name} VERSION 0.1.0 LANGUAGES CXX)

set(CMAKE_CXX_STANDARD 20)
set(CMAKE_CXX_STANDARD_REQUIRED ON)
set(CMAKE_EXPORT_COMPILE_COMMANDS ON)

# ---- Build Configuration ----
if(NOT CMAKE_BUILD_TYPE)
    set(CMAKE_BUILD_TYPE Debug)
endif()

# ---- Main Executable ----
add_executable(${{PROJECT_NAME}} src/main.cpp)

# ---- Tests ----
include(CTest)
enable_testing()

include(FetchContent)
FetchContent_Declare(
  googletest
  URL https://github.com/google/googletest/archive/refs/tags/v1.15.0.zip
  DOWNLOAD_EXTRACT_TIMESTAMP true
)
set(gtest_force_shared_crt ON CACHE BOOL "" FORCE)
FetchContent_MakeAvailable(googletest)

file(GLOB_RECURSE TEST_SOURCES "test/*.cpp" "test/*.cxx" "test/*.cc")
add_executable(${{PROJECT_NAME}}_tests ${{TEST_SOURCES}})
target_link_libraries(${{PROJECT_NAME}}_tests gtest_main)
target_include_directories(${{PROJECT_NAME}}_tests PRIVATE src)

add_test(NAME ${{PROJECT_NAME}}_tests COMMAND ${{PROJECT_NAME}}_tests)

# ---- Benchmarks ----
FetchContent_Declare(
  googlebenchmark
  URL https://github.com/google/benchmark/archive/refs/tags/v1.8.3.zip
  DOWNLOAD_EXTRACT_TIMESTAMP true
)
set(BENCHMARK_ENABLE_TESTING OFF CACHE BOOL "" FORCE)
FetchContent_MakeAvailable(googlebenchmark)

file(GLOB_RECURSE BENCH_SOURCES "bench/*.cpp" "bench/*.cxx" "bench/*.cc")
add_executable(${{PROJECT_NAME}}_bench ${{BENCH_SOURCES}})
target_link_libraries(${{PROJECT_NAME}}_bench benchmark::benchmark)
target_include_directories(${{PROJECT_NAME}}_bench PRIVATE src)

# ---- Installation ----
install(TARGETS ${{PROJECT_NAME}} DESTINATION bin)
"#
    )
}

pub fn main_cpp() -> &'static str {
    r#"#include <iostream>

int main() {
    std::cout << "Hello, world!\n";
    return 0;
}
"#
}

pub fn test_cpp() -> &'static str {
    r#"#include <gtest/gtest.h>

TEST(SampleTest, BasicAssertion) {
    EXPECT_EQ(2 + 2, 4);
}
"#
}

pub fn bench_cpp() -> &'static str {
    r#"#include <benchmark/benchmark.h>
#include <algorithm>
#include <vector>

static void BM_VectorSort(benchmark::State& state) {
  for (auto _ : state) {
    state.PauseTiming();
    std::vector<int> data(state.range(0));
    std::generate(data.begin(), data.end(), std::rand);
    state.ResumeTiming();

    std::sort(data.begin(), data.end());
  }
  state.SetComplexityN(state.range(0));
}

BENCHMARK(BM_VectorSort)->Range(8, 8<<10)->Complexity();

BENCHMARK_MAIN();
"#
}

pub fn gitignore() -> &'static str {
    r#"/build/
/docs/

/CMakeCache.txt
*.user

Doxyfile.bak
.clang-format.bak

# Keep fargo configuration but ignore per-mode build state
/.fargo/state/
"#
}

/// Contents of `profiles/default.conf`, generated from the same table the
/// resolver seeds its defaults from so the two can never drift apart.
pub fn default_profile() -> String {
    let mut out = String::from(
        "# Default fargo profile configuration\n\
         # Override these values in custom profiles\n\n",
    );
    for (key, value) in PROFILE_DEFAULTS {
        out.push_str(&format!("{key}=\"{value}\"\n"));
    }
    out
}

pub fn clang_format() -> &'static str {
    r#"---
BasedOnStyle: Google
IndentWidth: 4
TabWidth: 4
UseTab: Never
ColumnLimit: 100
BreakBeforeBraces: Attach
AllowShortFunctionsOnASingleLine: All
PointerAlignment: Left
ReferenceAlignment: Left
SpaceBeforeParens: ControlStatements
Standard: c++20
SortIncludes: true
IncludeBlocks: Regroup
"#
}

/// Doxyfile rendered from profile options.
pub fn doxyfile(project_name: &str, extract_all: &str, call_graph: &str) -> String {
    format!(
        r#"# Doxyfile for {project_name}
PROJECT_NAME           = "{project_name}"
PROJECT_BRIEF          = "A C++ project built with fargo"
OUTPUT_DIRECTORY       = docs
INPUT                  = src README.md
RECURSIVE              = YES
EXTRACT_ALL            = {extract_all}
EXTRACT_PRIVATE        = YES
EXTRACT_STATIC         = YES
GENERATE_HTML          = YES
GENERATE_LATEX         = NO
HTML_OUTPUT            = html
SOURCE_BROWSER         = YES
INLINE_SOURCES         = YES
CALL_GRAPH             = {call_graph}
CALLER_GRAPH           = {call_graph}
QUIET                  = YES
WARNINGS               = YES
FILE_PATTERNS          = *.cpp *.h *.hpp *.cxx *.cc
EXCLUDE_PATTERNS       = */build/* */.*
USE_MDFILE_AS_MAINPAGE = README.md
MARKDOWN_SUPPORT       = YES
"#
    )
}

pub fn readme(project_name: &str) -> String {
    format!(
        r#"# {project_name}

A C++ project built with fargo.

## Building

```bash
fargo build    # Debug build
fargo release  # Release build
```

## Running

```bash
fargo run      # Run the application
fargo test     # Run tests
fargo bench    # Run benchmarks
```

## Analysis

```bash
fargo check    # Static analysis
fargo asan     # AddressSanitizer
fargo tsan     # ThreadSanitizer
```
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::PROFILE_KEYS;

    #[test]
    fn cmakelists_declares_all_three_targets() {
        let content = cmakelists("demo");
        assert!(content.contains("project(demo VERSION"));
        assert!(content.contains("add_executable(${PROJECT_NAME} src/main.cpp)"));
        assert!(content.contains("${PROJECT_NAME}_tests"));
        assert!(content.contains("${PROJECT_NAME}_bench"));
    }

    #[test]
    fn default_profile_covers_every_key() {
        let content = default_profile();
        for key in PROFILE_KEYS {
            assert!(
                content.contains(&format!("{key}=")),
                "default profile missing {key}"
            );
        }
    }

    #[test]
    fn doxyfile_injects_profile_options() {
        let content = doxyfile("demo", "NO", "NO");
        assert!(content.contains("EXTRACT_ALL            = NO"));
        assert!(content.contains("CALL_GRAPH             = NO"));
    }
}
